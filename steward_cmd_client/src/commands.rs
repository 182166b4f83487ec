use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    CreateApplication {
        /// Application name
        #[clap(short, long)]
        name: String,

        /// Owner Id resolved against the directory service
        #[clap(short, long)]
        owner_id: String,

        /// Configuration parameter as key=value; may be repeated
        #[clap(short, long)]
        param: Vec<String>,
    },

    ListApplications,

    InspectApplication {
        /// Application Id
        #[clap(short, long)]
        id: String,
    },

    DeleteApplication {
        /// Application Id
        #[clap(short, long)]
        id: String,
    },

    CreateService {
        /// Service name
        #[clap(short, long)]
        name: String,

        /// Id of the owning application
        #[clap(short, long)]
        application_id: String,

        /// Image Id resolved against the image registry
        #[clap(short, long)]
        image_id: String,

        /// Configuration parameter as key=value; may be repeated
        #[clap(short, long)]
        param: Vec<String>,
    },

    ListServices,

    InspectService {
        /// Service Id
        #[clap(short, long)]
        id: String,
    },

    DeleteService {
        /// Service Id
        #[clap(short, long)]
        id: String,
    },

    CreateInstance {
        /// Instance name
        #[clap(short, long)]
        name: String,

        /// Id of the owning service
        #[clap(short, long)]
        service_id: String,

        /// Configuration parameter as key=value; may be repeated
        #[clap(short, long)]
        param: Vec<String>,
    },

    ListInstances,

    InspectInstance {
        /// Instance Id
        #[clap(short, long)]
        id: String,
    },

    DeleteInstance {
        /// Instance Id
        #[clap(short, long)]
        id: String,
    },

    DeployInstance {
        /// Instance Id
        #[clap(short, long)]
        id: String,
    },
}
