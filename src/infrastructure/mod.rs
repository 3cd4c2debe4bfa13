pub mod judges;
