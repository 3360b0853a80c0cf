mod refresh_token_store_tests;
