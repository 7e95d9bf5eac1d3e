//! One module per subcommand, each exposing `execute`.

pub mod add;
pub mod completions;
pub mod edit;
pub mod get;
pub mod init;
pub mod list;
pub mod login;
pub mod logout;
pub mod master;
pub mod rm;
pub mod version;
