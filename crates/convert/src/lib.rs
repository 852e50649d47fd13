//! `convert`: rewrites a log file into the tabbed encoding.
//!
//! Every line goes through the standard [`pipeline::Pipeline`]; converted
//! lines land in the output file, anything the pipeline rejects is copied
//! verbatim to a problems file.

pub mod boot;
pub mod cli;
pub mod conf;
pub mod run;
pub mod stats;
