mod test_centerline_basic;
mod test_sector_basic;
