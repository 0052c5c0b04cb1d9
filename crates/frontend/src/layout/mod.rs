pub mod home_layout;
