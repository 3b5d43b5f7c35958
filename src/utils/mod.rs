pub mod tolerance_ranges;
