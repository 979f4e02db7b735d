mod handoff;
mod menu;
mod modal;
mod operations;
mod screens;
mod session;
