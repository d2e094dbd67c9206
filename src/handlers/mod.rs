// API handlers: thin adapters between the HTTP surface and the data-access
// layer. Status codes and messages come from `DbAccess` unchanged.

pub mod health;
pub mod images;
pub mod users;
