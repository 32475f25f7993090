//! Parking Allocator Library
//!
//! Assigns parking spots to arriving vehicles, farthest from the entrance
//! first, with distances taken from a shortest-path search over the lot graph.

pub mod lot;
