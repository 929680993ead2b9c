// ==========================================
// 仓库库存登记系统 - 字段映射器实现
// ==========================================
// 职责: 原始行（标准列名或印尼语列名）→ 入库/出库记录
// 规则: 先标准字段名，再按顺序尝试别名；首个非空值胜出
// 红线: 映射永不失败，缺失/异常值降级为默认值
// ==========================================

use crate::domain::goods::{IncomingGoods, OutgoingGoods};
use crate::domain::upload::RawRow;
use crate::importer::data_cleaner::{
    normalize_asset_status, normalize_text, parse_quantity, sanitize_serial,
};
use crate::importer::goods_importer_trait::FieldMapper as FieldMapperTrait;

/// 入库数量无法解析时的默认值
pub const INCOMING_DEFAULT_QUANTITY: u32 = 0;
/// 出库数量无法解析时的默认值
pub const OUTGOING_DEFAULT_QUANTITY: u32 = 1;

const DEFAULT_UNIT: &str = "Unit";
const DEFAULT_ASSET_STATUS: &str = "Asset";
const DEFAULT_OUTGOING_STATUS: &str = "Alokasi";

// ==========================================
// 列名别名表（标准名在前）
// ==========================================
mod columns {
    // 共用
    pub const SERIAL_NUMBER: &[&str] = &["serial_number", "Serial Number", "SN"];
    pub const ITEM_NAME: &[&str] = &["item_name", "Nama Barang"];
    pub const QUANTITY: &[&str] = &["quantity", "Kuantitas", "Qty"];
    pub const UNIT: &[&str] = &["unit", "Satuan"];
    pub const REMARKS: &[&str] = &["remarks", "Keterangan"];

    // 入库
    pub const CONTRACT_DATE: &[&str] = &["contract_date", "Tanggal Kontrak"];
    pub const CONTRACT_NO: &[&str] = &["contract_no", "No Kontrak"];
    pub const DELIVERY_NO: &[&str] = &["delivery_no", "No Delivery"];
    pub const DO_DATE: &[&str] = &["do_date", "Tanggal DO"];
    pub const REGION: &[&str] = &["region", "Region", "Wilayah"];
    pub const SPPB: &[&str] = &["sppb", "SPPB"];
    pub const ITEM_TYPE: &[&str] = &["item_type", "Tipe Barang"];
    pub const PART_NUMBER: &[&str] = &["part_number", "Part Number"];
    pub const MATERIAL_ID: &[&str] = &["material_id", "Material ID"];
    pub const MATERIAL_GROUP: &[&str] = &["material_group", "Material Group"];
    pub const DESCRIPTION: &[&str] = &["description", "Deskripsi"];
    pub const INSPECTION_DATE: &[&str] = &["inspection_date", "Tanggal Inspeksi"];
    pub const ASSET_STATUS: &[&str] = &["asset_status", "Status Aset"];
    pub const LEASE_END_DATE: &[&str] = &["lease_end_date", "Tanggal Akhir Sewa"];
    pub const CATEGORY: &[&str] = &["category", "Kategori"];
    pub const VENDOR: &[&str] = &["vendor", "Vendor"];

    // 出库
    pub const REQUEST_DATE: &[&str] = &["request_date", "Tanggal Permintaan"];
    pub const REQUEST_NO: &[&str] = &["request_no", "No Permintaan"];
    pub const FUNCTION_DIV: &[&str] = &["function_div", "Fungsi/Divisi"];
    pub const EMPLOYEE_ID: &[&str] = &["employee_id", "ID Karyawan"];
    pub const EMPLOYEE_NAME: &[&str] = &["employee_name", "Nama Karyawan"];
    pub const DIVISION: &[&str] = &["division", "Divisi"];
    pub const PHONE: &[&str] = &["phone", "Telepon"];
    pub const EMAIL: &[&str] = &["email", "Email"];
    pub const POSITION: &[&str] = &["position", "Jabatan"];
    pub const WORK_LOCATION: &[&str] = &["work_location", "Lokasi Kerja"];
    pub const TECHNICIAN_NAME: &[&str] = &["technician_name", "Nama Teknisi"];
    pub const ORIGIN_REGION: &[&str] = &["origin_region", "Region Asal"];
    pub const ALLOCATION_REGION: &[&str] = &["allocation_region", "Region Alokasi"];
    pub const STATUS: &[&str] = &["status", "Status"];
    pub const RETURN_DATE: &[&str] = &["return_date", "Tanggal Kembali"];
}

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_incoming(&self, row: &RawRow) -> IncomingGoods {
        IncomingGoods {
            id: None,

            // 合同与交货
            contract_date: self.get_raw(row, columns::CONTRACT_DATE),
            contract_no: self.get_text(row, columns::CONTRACT_NO, ""),
            delivery_no: self.get_text(row, columns::DELIVERY_NO, ""),
            do_date: self.get_raw(row, columns::DO_DATE),
            sppb: self.get_text(row, columns::SPPB, ""),

            // 数量
            quantity: self.get_quantity(row, INCOMING_DEFAULT_QUANTITY),
            unit: self.get_text(row, columns::UNIT, DEFAULT_UNIT),

            // 物品
            serial_number: self.get_serial(row),
            item_name: self.get_text(row, columns::ITEM_NAME, ""),
            item_type: self.get_text(row, columns::ITEM_TYPE, ""),
            part_number: self.get_text(row, columns::PART_NUMBER, ""),
            material_id: self.get_text(row, columns::MATERIAL_ID, ""),
            material_group: self.get_text(row, columns::MATERIAL_GROUP, ""),
            category: self.get_text(row, columns::CATEGORY, ""),
            vendor: self.get_text(row, columns::VENDOR, ""),
            region: self.get_text(row, columns::REGION, ""),

            // 归属
            asset_status: normalize_asset_status(
                self.lookup(row, columns::ASSET_STATUS)
                    .unwrap_or(DEFAULT_ASSET_STATUS),
            ),
            lease_end_date: self.get_raw(row, columns::LEASE_END_DATE),
            inspection_date: self.get_raw(row, columns::INSPECTION_DATE),

            // 自由文本
            remarks: self.get_free_text(row, columns::REMARKS),
            description: self.get_free_text(row, columns::DESCRIPTION),
        }
    }

    fn map_outgoing(&self, row: &RawRow) -> OutgoingGoods {
        OutgoingGoods {
            id: None,

            request_date: self.get_raw(row, columns::REQUEST_DATE),
            request_no: self.get_text(row, columns::REQUEST_NO, ""),
            function_div: self.get_text(row, columns::FUNCTION_DIV, ""),

            employee_id: self.get_text(row, columns::EMPLOYEE_ID, ""),
            employee_name: self.get_text(row, columns::EMPLOYEE_NAME, ""),
            division: self.get_text(row, columns::DIVISION, ""),
            phone: self.get_free_text(row, columns::PHONE),
            email: self.get_free_text(row, columns::EMAIL),
            position: self.get_text(row, columns::POSITION, ""),
            work_location: self.get_text(row, columns::WORK_LOCATION, ""),
            technician_name: self.get_text(row, columns::TECHNICIAN_NAME, ""),

            origin_region: self.get_text(row, columns::ORIGIN_REGION, ""),
            allocation_region: self.get_text(row, columns::ALLOCATION_REGION, ""),

            serial_number: self.get_serial(row),
            item_name: self.get_text(row, columns::ITEM_NAME, ""),
            quantity: self.get_quantity(row, OUTGOING_DEFAULT_QUANTITY),
            unit: self.get_text(row, columns::UNIT, DEFAULT_UNIT),

            // 状态只做 TRIM + UPPER，不校验取值
            status: self.get_text(row, columns::STATUS, DEFAULT_OUTGOING_STATUS),
            return_date: self.get_raw(row, columns::RETURN_DATE),

            remarks: self.get_free_text(row, columns::REMARKS),
        }
    }
}

impl FieldMapper {
    /// 按别名顺序查找首个非空原始值（不做 TRIM）
    fn lookup<'a>(&self, row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
        aliases
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    /// 文本字段: TRIM + UPPER
    fn get_text(&self, row: &RawRow, aliases: &[&str], default: &str) -> String {
        normalize_text(self.lookup(row, aliases).unwrap_or(default))
    }

    /// 自由文本字段: 原样透传
    fn get_free_text(&self, row: &RawRow, aliases: &[&str]) -> String {
        self.lookup(row, aliases).unwrap_or_default().to_string()
    }

    /// 日期字段: 原样透传，缺失为 None
    fn get_raw(&self, row: &RawRow, aliases: &[&str]) -> Option<String> {
        self.lookup(row, aliases).map(str::to_string)
    }

    fn get_serial(&self, row: &RawRow) -> String {
        sanitize_serial(self.lookup(row, columns::SERIAL_NUMBER).unwrap_or_default())
    }

    fn get_quantity(&self, row: &RawRow, default: u32) -> u32 {
        match self.lookup(row, columns::QUANTITY) {
            Some(value) => parse_quantity(value, default),
            None => default,
        }
    }
}
