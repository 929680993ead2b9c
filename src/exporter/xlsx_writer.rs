// ==========================================
// 仓库库存登记系统 - 工作簿生成
// ==========================================
// 约定:
// - 表头 = 记录字段名（顺序固定，见 GoodsRecord::columns）
// - 每条记录一行；空集合仅输出表头
// - 文件名 <报表名>_<YYYY-MM-DD>.xlsx
// ==========================================

use crate::domain::goods::{CellValue, GoodsRecord, IncomingGoods, OutgoingGoods};
use crate::exporter::error::ExportResult;
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

/// 合并报表名
pub const COMBINED_REPORT_NAME: &str = "laporan_inventaris";

/// 报表文件名
pub fn report_file_name(report: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", report, date.format("%Y-%m-%d"))
}

/// 单类报表（一个工作表，以类别命名）
pub fn build_goods_workbook<T: GoodsRecord>(records: &[T]) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    append_sheet(&mut workbook, records, &header_format)?;

    Ok(workbook.save_to_buffer()?)
}

/// 合并报表（Barang Masuk + Barang Keluar 两个工作表）
pub fn build_combined_workbook(
    incoming: &[IncomingGoods],
    outgoing: &[OutgoingGoods],
) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    append_sheet(&mut workbook, incoming, &header_format)?;
    append_sheet(&mut workbook, outgoing, &header_format)?;

    Ok(workbook.save_to_buffer()?)
}

fn append_sheet<T: GoodsRecord>(
    workbook: &mut Workbook,
    records: &[T],
    header_format: &Format,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(T::KIND.sheet_name())?;

    write_headers(sheet, T::columns(), header_format)?;

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, cell) in record.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(text) => {
                    sheet.write_string(row, col, text)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::AssetStatus;
    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use std::io::Cursor;

    fn read_sheets(bytes: Vec<u8>) -> Vec<(String, Vec<Vec<Data>>)> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        workbook
            .sheet_names()
            .into_iter()
            .map(|name| {
                let range = workbook.worksheet_range(&name).unwrap();
                let rows = range.rows().map(|r| r.to_vec()).collect();
                (name, rows)
            })
            .collect()
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(report_file_name("barang_masuk", date), "barang_masuk_2024-03-07.xlsx");
        assert_eq!(
            report_file_name(COMBINED_REPORT_NAME, date),
            "laporan_inventaris_2024-03-07.xlsx"
        );
    }

    #[test]
    fn test_goods_workbook_rows() {
        let records = vec![
            IncomingGoods {
                serial_number: "SN-001".to_string(),
                item_name: "POMPA".to_string(),
                quantity: 5,
                asset_status: AssetStatus::Sewa,
                ..Default::default()
            },
            IncomingGoods {
                serial_number: "SN-002".to_string(),
                item_name: "KABEL".to_string(),
                quantity: 2,
                ..Default::default()
            },
        ];

        let sheets = read_sheets(build_goods_workbook(&records).unwrap());
        assert_eq!(sheets.len(), 1);

        let (name, rows) = &sheets[0];
        assert_eq!(name, "Barang Masuk");
        assert_eq!(rows.len(), 3);

        let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
        assert_eq!(header, IncomingGoods::columns());

        let serial_col = header.iter().position(|h| h == "serial_number").unwrap();
        let quantity_col = header.iter().position(|h| h == "quantity").unwrap();
        let status_col = header.iter().position(|h| h == "asset_status").unwrap();
        assert_eq!(rows[1][serial_col], Data::String("SN-001".to_string()));
        assert_eq!(rows[1][quantity_col], Data::Float(5.0));
        assert_eq!(rows[1][status_col], Data::String("Sewa".to_string()));
        assert_eq!(rows[2][serial_col], Data::String("SN-002".to_string()));
    }

    #[test]
    fn test_empty_workbook_has_header_only() {
        let sheets = read_sheets(build_goods_workbook::<OutgoingGoods>(&[]).unwrap());
        let (name, rows) = &sheets[0];
        assert_eq!(name, "Barang Keluar");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), OutgoingGoods::columns().len());
    }

    #[test]
    fn test_combined_workbook_sheet_order() {
        let outgoing = vec![OutgoingGoods {
            serial_number: "SN-9".to_string(),
            item_name: "LAPTOP".to_string(),
            status: "PINJAM".to_string(),
            ..Default::default()
        }];

        let sheets = read_sheets(build_combined_workbook(&[], &outgoing).unwrap());
        let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Barang Masuk", "Barang Keluar"]);
        assert_eq!(sheets[0].1.len(), 1);
        assert_eq!(sheets[1].1.len(), 2);
    }
}
