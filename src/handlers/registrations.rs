use crate::cli::RegistrationCommand;
use crate::client::resources::Registrations;
use crate::client::{HttpClient, ResourceClient};
use crate::models::Id;
use crate::utils::error::ClientError;
use crate::views::registration::{user_registrations, RegistrationPanel};
use crate::views::render::render_table;

pub(super) async fn handle(
    command: RegistrationCommand,
    http: HttpClient,
) -> Result<String, ClientError> {
    let client = ResourceClient::<Registrations>::new(http);
    match command {
        RegistrationCommand::Event { event_id } => {
            let panel = RegistrationPanel::open(client, Id::new(&event_id)).await;
            Ok(panel.render())
        }
        RegistrationCommand::User { user_id } => {
            let records = user_registrations(&client, &Id::new(&user_id)).await?;
            Ok(render_table(&records))
        }
        RegistrationCommand::Register { event, user } => {
            let user = Id::new(&user);
            let mut panel = RegistrationPanel::open(client, Id::new(&event)).await;
            panel.register(&user).await?;
            Ok(format!(
                "Registered user {user} for event {}\n\n{}",
                panel.event_id(),
                panel.render()
            ))
        }
        RegistrationCommand::Unregister { event, user } => {
            let user = Id::new(&user);
            let mut panel = RegistrationPanel::open(client, Id::new(&event)).await;
            panel.unregister(&user).await?;
            Ok(format!(
                "Unregistered user {user} from event {}\n\n{}",
                panel.event_id(),
                panel.render()
            ))
        }
    }
}
