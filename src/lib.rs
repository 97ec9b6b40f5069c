//! folio - a personal portfolio site with an admin API, gated by a remote
//! config store that can switch the site into maintenance mode.

pub mod auth;
pub mod cli;
pub mod edge_config;
pub mod gate;
pub mod http_server;
pub mod store;
pub mod util;
