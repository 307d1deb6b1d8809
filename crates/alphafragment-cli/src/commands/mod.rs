pub mod domains;
pub mod fragment;
