pub mod appsettings;
