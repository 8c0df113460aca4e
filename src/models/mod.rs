pub mod college;
pub mod event;
pub mod id;
pub mod location;
pub mod profile;
pub mod registration;
pub mod user;

pub use college::College;
pub use event::{Event, OrganizerType};
pub use id::Id;
pub use location::Location;
pub use profile::{Principal, Profile};
pub use registration::Registration;
pub use user::User;
