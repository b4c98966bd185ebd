//! CSV output formatting.

use super::grid_row;
use crate::host::HostRecord;
use crate::schema::ReportSchema;
use std::io::Write;

/// Write the report grid as CSV: a header row of column labels, then one
/// row per host.
pub fn write_csv<W: Write>(out: W, schema: &ReportSchema, hosts: &[HostRecord]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(schema.labels())?;

    for host in hosts {
        wtr.write_record(grid_row(schema, host))?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;

    #[test]
    fn test_csv_grid() {
        let schema =
            ReportSchema::from_labels(&["IP Address", "Name", "OS", "SSH (22)", "Other"]).unwrap();
        let hosts = vec![
            HostRecord::build(
                &schema,
                "10.0.0.1".parse().unwrap(),
                "a.local",
                Some("Linux 3.2 - 4.0".to_string()),
                &[Port::new(22), Port::new(80), Port::new(443)],
                false,
            ),
            HostRecord::build(&schema, "10.0.0.2".parse().unwrap(), "", None, &[Port::new(25)], false),
        ];

        let mut buf = Vec::new();
        write_csv(&mut buf, &schema, &hosts).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "IP Address,Name,OS,SSH (22),Other\n\
             10.0.0.1,a.local,Linux 3.2 - 4.0,X,\"80, 443\"\n\
             10.0.0.2,,,,25\n"
        );
    }
}
