pub mod sink;

pub use sink::BranchSink;
