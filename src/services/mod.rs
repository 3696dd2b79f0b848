pub mod advice_client;
