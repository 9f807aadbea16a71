pub mod creator_token;
