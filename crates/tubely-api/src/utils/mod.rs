pub mod asset_name;
pub mod path;
pub mod upload;
