mod signer_tests;
