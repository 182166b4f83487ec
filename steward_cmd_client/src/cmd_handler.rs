use std::collections::HashMap;
use std::str::FromStr;

use log::info;
use steward_client::application::ApplicationConfig;
use steward_client::instance::InstanceConfig;
use steward_client::service::ServiceConfig;
use steward_client_lib::StewardConnection;
use uuid::Uuid;

use crate::commands::Command;

pub struct CommandHandler {
    connection: StewardConnection,
}

impl CommandHandler {
    pub fn new(connection: StewardConnection) -> Self {
        Self { connection }
    }

    pub async fn handle_command(&mut self, command: Command) -> Result<(), anyhow::Error> {
        match command {
            Command::CreateApplication {
                name,
                owner_id,
                param,
            } => {
                let application = self
                    .connection
                    .create_application(ApplicationConfig {
                        uuid: None,
                        name,
                        owner_uuid: Uuid::from_str(&owner_id)?,
                        params: parse_params(&param)?,
                    })
                    .await?;
                info!("Created application with uuid: {}", application.uuid);
                Ok(())
            }
            Command::ListApplications => {
                let applications = self.connection.list_applications().await?;
                info!("Applications: {applications:#?}");
                Ok(())
            }
            Command::InspectApplication { id } => {
                let application = self
                    .connection
                    .get_application(Uuid::from_str(&id)?)
                    .await?;
                info!("Application: {application:#?}");
                Ok(())
            }
            Command::DeleteApplication { id } => {
                Ok(self
                    .connection
                    .delete_application(Uuid::from_str(&id)?)
                    .await?)
            }
            Command::CreateService {
                name,
                application_id,
                image_id,
                param,
            } => {
                let service = self
                    .connection
                    .create_service(ServiceConfig {
                        uuid: None,
                        name,
                        application_uuid: Uuid::from_str(&application_id)?,
                        image_uuid: Uuid::from_str(&image_id)?,
                        params: parse_params(&param)?,
                    })
                    .await?;
                info!("Created service with uuid: {}", service.uuid);
                Ok(())
            }
            Command::ListServices => {
                let services = self.connection.list_services().await?;
                info!("Services: {services:#?}");
                Ok(())
            }
            Command::InspectService { id } => {
                let service = self.connection.get_service(Uuid::from_str(&id)?).await?;
                info!("Service: {service:#?}");
                Ok(())
            }
            Command::DeleteService { id } => {
                Ok(self.connection.delete_service(Uuid::from_str(&id)?).await?)
            }
            Command::CreateInstance {
                name,
                service_id,
                param,
            } => {
                let instance = self
                    .connection
                    .create_instance(InstanceConfig {
                        uuid: None,
                        name,
                        service_uuid: Uuid::from_str(&service_id)?,
                        params: parse_params(&param)?,
                    })
                    .await?;
                info!("Created instance with uuid: {}", instance.uuid);
                Ok(())
            }
            Command::ListInstances => {
                let instances = self.connection.list_instances().await?;
                info!("Instances: {instances:#?}");
                Ok(())
            }
            Command::InspectInstance { id } => {
                let instance = self.connection.get_instance(Uuid::from_str(&id)?).await?;
                info!("Instance: {instance:#?}");
                Ok(())
            }
            Command::DeleteInstance { id } => {
                Ok(self
                    .connection
                    .delete_instance(Uuid::from_str(&id)?)
                    .await?)
            }
            Command::DeployInstance { id } => {
                let workload_uuid = self
                    .connection
                    .deploy_instance(Uuid::from_str(&id)?)
                    .await?;
                info!("Deployed instance as workload: {}", workload_uuid);
                Ok(())
            }
        }
    }
}

fn parse_params(params: &[String]) -> Result<HashMap<String, String>, anyhow::Error> {
    params
        .iter()
        .map(|param| {
            param
                .split_once('=')
                .map(|(key, value)| (String::from(key), String::from(value)))
                .ok_or(anyhow::Error::msg(format!(
                    "Parameter '{param}' isn't of form key=value"
                )))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use crate::cmd_parser::CmdParser;
    use crate::commands::Command;

    use super::parse_params;

    #[test]
    fn parse_key_value_params() {
        let params = parse_params(&[String::from("tier=db"), String::from("zone=eu")]).unwrap();
        assert_eq!(params.get("tier").map(String::as_str), Some("db"));
        assert_eq!(params.get("zone").map(String::as_str), Some("eu"));
    }

    #[test]
    fn malformed_param_is_rejected() {
        assert!(parse_params(&[String::from("no-separator")]).is_err());
    }

    #[test]
    fn parse_create_application_command_line() {
        let argv = [
            "create-application",
            "--name",
            "app1",
            "--owner-id",
            "70471a82-2e44-4d0c-b4f4-2f34b7b64b62",
            "--param",
            "tier=db",
        ];
        let parsed = CmdParser::try_parse_from(argv).unwrap();
        assert_eq!(
            parsed.command,
            Command::CreateApplication {
                name: String::from("app1"),
                owner_id: String::from("70471a82-2e44-4d0c-b4f4-2f34b7b64b62"),
                param: vec![String::from("tier=db")],
            }
        );
    }

    #[test]
    fn parse_deploy_instance_command_line() {
        let argv = ["deploy-instance", "--id", "a46289a4-5902-4586-81a3-908bdd62e7a1"];
        let parsed = CmdParser::try_parse_from(argv).unwrap();
        assert_eq!(
            parsed.command,
            Command::DeployInstance {
                id: String::from("a46289a4-5902-4586-81a3-908bdd62e7a1"),
            }
        );
    }
}
