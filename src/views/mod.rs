pub mod epoch;
pub mod form;
pub mod list;
pub mod registration;
pub mod render;

pub use form::FormController;
pub use list::ListView;
pub use registration::RegistrationPanel;
