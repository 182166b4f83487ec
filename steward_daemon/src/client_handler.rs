pub mod client_command_handler;
