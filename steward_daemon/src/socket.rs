pub mod unix_socket_server;
