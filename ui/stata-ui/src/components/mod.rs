pub mod approve;
pub mod balance;
pub mod connection_status;
pub mod history;
pub mod layout;
pub mod submit;
pub mod wrap;

#[cfg(test)]
pub(crate) mod testing;
