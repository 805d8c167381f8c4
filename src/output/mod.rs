use crate::models::{MajorShareholdersResponse, ThaiStockFinancialsResponse};
use anyhow::{bail, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// For responses that have no flat tabular shape.
pub fn json_only<T: Serialize>(value: &T, format: Format) -> Result<()> {
    if format == Format::Csv {
        bail!("csv output is only available for key-financials and shareholders");
    }
    json(value)
}

pub fn financials_csv(resp: &ThaiStockFinancialsResponse) -> Result<()> {
    write_financials(resp, std::io::stdout().lock())
}

pub fn shareholders_csv(resp: &MajorShareholdersResponse) -> Result<()> {
    write_shareholders(resp, std::io::stdout().lock())
}

/// One line per (row, period) cell; absent values are left empty.
fn write_financials<W: Write>(resp: &ThaiStockFinancialsResponse, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["section", "rowKey", "label", "periodKey", "value"])?;
    for section in &resp.payload.sections {
        for row in &section.rows {
            for cell in &row.values {
                let value = cell.value.map(|v| v.to_string()).unwrap_or_default();
                wtr.write_record([
                    section.section_key.as_str(),
                    row.row_key.as_str(),
                    row.label.as_str(),
                    cell.period_key.as_str(),
                    value.as_str(),
                ])?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

fn write_shareholders<W: Write>(resp: &MajorShareholdersResponse, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["rank", "name", "shares", "percent"])?;
    for holder in &resp.payload.items {
        wtr.write_record([
            holder.rank.to_string(),
            holder.name.clone(),
            holder.shares.map(|v| v.to_string()).unwrap_or_default(),
            holder.percent.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::assemble;
    use crate::models::{FinancialSection, KeyFinancials, MetricRow, MetricValue, PeriodKey, ShareholderRecord};
    use chrono::{TimeZone, Utc};

    fn as_of() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_financials_csv_one_line_per_cell() {
        let payload = KeyFinancials {
            unit: "ล้านบาท".into(),
            periods: vec![
                PeriodKey { key: "FY2566".into(), label: "งบปี 2566".into() },
                PeriodKey { key: "FY2567".into(), label: "งบปี 2567".into() },
            ],
            sections: vec![FinancialSection {
                section_key: "keyFinancials".into(),
                section_label: "บัญชีทางการเงินที่สำคัญ".into(),
                rows: vec![MetricRow {
                    row_key: "totalAssets".into(),
                    label: "สินทรัพย์รวม".into(),
                    values: vec![
                        MetricValue { period_key: "FY2566".into(), value: Some(1250.5) },
                        MetricValue { period_key: "FY2567".into(), value: None },
                    ],
                }],
            }],
        };
        let resp = assemble::assemble_at("bts", "https://set.test", as_of(), payload);

        let mut buf = Vec::new();
        write_financials(&resp, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "section,rowKey,label,periodKey,value");
        assert_eq!(lines[1], "keyFinancials,totalAssets,สินทรัพย์รวม,FY2566,1250.5");
        assert_eq!(lines[2], "keyFinancials,totalAssets,สินทรัพย์รวม,FY2567,");
    }

    #[test]
    fn test_shareholders_csv_quotes_names() {
        let items = vec![ShareholderRecord {
            rank: 1,
            name: "Thai NVDR Co., Ltd.".into(),
            shares: Some(1000.0),
            percent: Some(12.5),
        }];
        let resp = assemble::assemble_at("ptt", "https://set.test", as_of(), assemble::major_shareholders(items));

        let mut buf = Vec::new();
        write_shareholders(&resp, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().nth(1), Some(r#"1,"Thai NVDR Co., Ltd.",1000,12.5"#));
    }

    #[test]
    fn test_json_only_rejects_csv() {
        assert!(json_only(&serde_json::json!({}), Format::Csv).is_err());
    }
}
