// ---------------- CSV → plants.json ----------------
// 一次性离线转换：表头行位置固定（不自动探测），任何错误都中止，不留半成品

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use crate::plant::{Cordage, Edibility, FrictionFire, Medicinal, PlantRecord, Tinder, Wood};

/// 表格导出时前三行是标题/说明，第 4 行才是表头
pub const DEFAULT_HEADER_ROW: usize = 3;

const TRUTHY: [&str; 5] = ["yes", "y", "true", "1", "x"];
const SEE_NOTES: &str = "see notes";

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("header row {index} not found (file has {rows} rows)")]
    MissingHeader { index: usize, rows: usize },

    #[error("header row {index} has no Common Name column")]
    NoNameColumn { index: usize },
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// 去掉首尾空白以及残留的引号
pub fn clean(v: &str) -> String {
    v.trim().trim_matches('"').to_string()
}

pub fn to_bool(v: &str) -> bool {
    let s = clean(v).to_lowercase();
    TRUTHY.contains(&s.as_str())
}

/// "Scientific Name (Taxon)" → "scientific_name_taxon_"
pub fn normalize_header(h: &str) -> String {
    NON_ALNUM
        .replace_all(&clean(h).to_lowercase(), "_")
        .into_owned()
}

/// 引号字段、双引号转义、CRLF 都交给 csv crate；行长不要求一致。
/// csv crate 会跳过空行，这里把它们补回成单个空单元格的行，表头行号按物理行计
pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let bytes = text.as_bytes();
    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        // 记录的 position 是上一条记录结束处，空行在它之后
        let from = record.position().map_or(0, |p| p.byte() as usize);
        let blank = skipped_blank_lines(bytes, from);
        rows.extend(std::iter::repeat_with(|| vec![String::new()]).take(blank));
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}

fn skipped_blank_lines(bytes: &[u8], from: usize) -> usize {
    let mut rest = bytes.get(from..).unwrap_or_default();
    // 上一条以 \r\n 结尾时 \n 可能还没被吃掉
    let after_cr = from.checked_sub(1).and_then(|i| bytes.get(i)) == Some(&b'\r');
    if after_cr && rest.first() == Some(&b'\n') {
        rest = &rest[1..];
    }
    rest.iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .filter(|b| **b == b'\n')
        .count()
}

pub fn plants_from_rows(rows: &[Vec<String>], header_row: usize) -> Result<Vec<PlantRecord>> {
    let header = rows.get(header_row).ok_or(ImportError::MissingHeader {
        index: header_row,
        rows: rows.len(),
    })?;
    let headers: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
    debug!(?headers, "csv headers");
    if !headers.iter().any(|h| h == "common_name") {
        return Err(ImportError::NoNameColumn { index: header_row });
    }

    let mut plants = Vec::new();
    for (offset, r) in rows.iter().enumerate().skip(header_row + 1) {
        if !r.iter().any(|c| !clean(c).is_empty()) {
            continue;
        }
        let mut row: HashMap<&str, &str> = HashMap::new();
        for (i, h) in headers.iter().enumerate() {
            row.insert(h.as_str(), r.get(i).map(|s| s.as_str()).unwrap_or(""));
        }
        let plant = plant_from_row(&row);
        if plant.common_name.is_empty() {
            debug!(row = offset, "dropping row without common_name");
            continue;
        }
        plants.push(plant);
    }
    Ok(plants)
}

fn plant_from_row(row: &HashMap<&str, &str>) -> PlantRecord {
    let get = |k: &str| row.get(k).copied().unwrap_or("");
    let fire_wood = to_bool(get("friction_fire_wood"));
    let see_notes = |flag: bool| {
        if flag {
            vec![SEE_NOTES.to_string()]
        } else {
            Vec::new()
        }
    };
    PlantRecord {
        common_name: clean(get("common_name")),
        scientific_name: clean(get("scientific_name_taxon")),
        uses: Vec::new(),
        friction_fire: FrictionFire {
            spindle: fire_wood,
            hearth: fire_wood,
            notes: clean(get("friction_fire_notes")),
        },
        // 表里没有火绒列
        tinder: Tinder::default(),
        cordage: Cordage {
            usable: to_bool(get("cordage_fiber")),
            material: String::new(),
        },
        wood: Wood {
            usable: fire_wood,
            notes: String::new(),
        },
        edibility: Edibility {
            edible_parts: see_notes(to_bool(get("edible"))),
            preparation: String::new(),
            cautions: clean(get("key_cautions_lookalikes")),
        },
        medicinal: Medicinal {
            uses: see_notes(to_bool(get("medicinal"))),
            preparation: String::new(),
            cautions: String::new(),
        },
        image_url: None,
    }
}

pub fn convert(text: &str, header_row: usize) -> Result<Vec<PlantRecord>> {
    let rows = parse_rows(text)?;
    plants_from_rows(&rows, header_row)
}

/// 读 CSV、转换、整体写出；先写临时文件再 rename，失败时不会留下残缺的输出
pub fn run_import(input: &Path, output: &Path, header_row: usize) -> Result<usize> {
    if !input.exists() {
        return Err(ImportError::InputNotFound(input.to_path_buf()));
    }
    let text = fs::read_to_string(input)?;
    let plants = convert(&text, header_row)?;
    let json = serde_json::to_string_pretty(&plants)?;

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = output.with_extension("json.tmp");
    if let Err(e) = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, output)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    info!(
        input = %input.display(),
        output = %output.display(),
        count = plants.len(),
        "import finished"
    );
    Ok(plants.len())
}
