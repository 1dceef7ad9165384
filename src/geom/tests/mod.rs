mod test_surface_basic;
