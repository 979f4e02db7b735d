mod helpers;
mod main_layout;
mod popups;
mod screens;
