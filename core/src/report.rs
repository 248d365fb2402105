use std::io::Write;

use crate::metrics::PmcRecord;
use crate::timeseries::Timeseries;

/// Skriver PMC-tabellen som CSV: `recorded,type,TSS`.
pub fn write_pmc_csv<W: Write>(records: &[PmcRecord], out: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Skriver Timeseries som CSV: `timestamp,<variabler...>`. NaN blir tom celle.
pub fn write_timeseries_csv<W: Write>(ts: &Timeseries, out: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header = vec!["timestamp".to_string()];
    header.extend(ts.variables().map(|v| v.as_str().to_string()));
    wtr.write_record(&header)?;

    for (row, t) in ts.index().iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push(t.to_rfc3339());
        for (_, values) in ts.columns() {
            let v = values[row];
            record.push(if v.is_nan() { String::new() } else { v.to_string() });
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Kort oppsummering av PMC-tabellen til stdout.
pub fn print_pmc_report(records: &[PmcRecord]) {
    let total: f64 = records.iter().map(|r| r.tss).sum();
    let avg = if records.is_empty() { 0.0 } else { total / records.len() as f64 };

    println!("--- PMC-rapport ---");
    println!("Aktiviteter: {}", records.len());
    if let (Some(first), Some(last)) = (
        records.iter().map(|r| r.recorded).min(),
        records.iter().map(|r| r.recorded).max(),
    ) {
        println!("Periode: {first} – {last}");
    }
    println!("Sum TSS: {:.1}", total);
    println!("Snitt TSS: {:.1}", avg);
}
