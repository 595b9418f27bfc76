//! Command-line argument definitions.

use crate::processing::FamilyFilter;
use clap::Parser;
use std::path::PathBuf;

/// Expand CIDR ranges into individual host addresses.
#[derive(Parser, Debug)]
#[command(name = "cidrex")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Print only IPv4 addresses
    #[arg(short = '4', long = "ipv4")]
    pub ipv4: bool,

    /// Print only IPv6 addresses
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,

    /// Input file with one address or CIDR per line (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl Args {
    /// Family gates from the flags.
    ///
    /// Neither flag set means both families are included.
    pub fn family_filter(&self) -> FamilyFilter {
        if self.ipv4 || self.ipv6 {
            FamilyFilter {
                ipv4: self.ipv4,
                ipv6: self.ipv6,
            }
        } else {
            FamilyFilter::all()
        }
    }
}
