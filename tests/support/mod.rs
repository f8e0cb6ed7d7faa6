#![allow(dead_code)]

pub mod obra_env;
pub mod stub_server;
