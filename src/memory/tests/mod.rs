mod test_encode_basic;
