// src/output.rs
use crate::models::heston::HestonPaths;
use std::fs::File;
use std::io::{self, Write};

/// Write simulated price trajectories to CSV, one row per trajectory
pub fn write_paths_to_csv(filename: &str, paths: &HestonPaths) -> io::Result<()> {
    let mut file = File::create(filename)?;
    let steps = paths.prices.ncols();

    write!(file, "path_id")?;
    for step in 0..steps {
        write!(file, ",s_{}", step)?;
    }
    writeln!(file)?;

    for (i, row) in paths.prices.rows().into_iter().enumerate() {
        write!(file, "{}", i)?;
        for s in row {
            write!(file, ",{}", s)?;
        }
        writeln!(file)?;
    }
    Ok(())
}

/// Write a key/value run summary (parameters, price estimate) to CSV
pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, String)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
