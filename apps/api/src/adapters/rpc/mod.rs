pub mod token_check;
