//! Introspection and configuration tools for the deltapack codec.
//!
//! This crate turns human-tuned field configs into the scheme words and bit
//! costs the codec will actually use, so bandwidth budgets can be reviewed
//! before anything ships:
//!
//! - Compose schemes from quantization params
//! - Report per-field full/delta bit widths and achieved precision
//! - Print the quantization-table fingerprint peers compare at handshake
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use schema::{
    FieldMeta, FloatQuantizeParam, Int64CompressParam, IntCompressParam, QuaternionQuantizeParam,
};

/// One field entry of a scheme-plan config file.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Field category plus its quantization params.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Float {
        full_range: f32,
        delta_range: Option<f32>,
        precision: f32,
    },
    Quaternion {
        precision: f32,
    },
    Int {
        full_range: u32,
        delta_range: Option<u32>,
    },
    Int64 {
        full_range: u64,
        delta_range: Option<u64>,
    },
}

/// Planned encoding for one field.
#[derive(Debug, Clone, Serialize)]
pub struct SchemePlan {
    pub name: String,
    /// The packed scheme word the codec will be handed.
    pub scheme: u32,
    /// Bits per full encoding of one value.
    pub full_bits: u32,
    /// Bits per delta encoding of one changed value.
    pub delta_bits: u32,
    /// Worst-case quantization error, when the field is lossy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<f32>,
    /// The resolved field metadata the codec would be configured with.
    pub meta: FieldMeta,
}

/// Composes schemes and bit costs for every field in the config.
///
/// # Errors
///
/// Fails when a field's params fall outside what the quantization tables
/// cover (the codec would debug-assert on such a scheme).
pub fn plan_fields(fields: &[FieldConfig]) -> Result<Vec<SchemePlan>> {
    fields.iter().map(plan_field).collect()
}

fn plan_field(field: &FieldConfig) -> Result<SchemePlan> {
    match field.kind {
        FieldKind::Float {
            full_range,
            delta_range,
            precision,
        } => {
            let delta_range = delta_range.unwrap_or(full_range);
            if codec::find_int_index(full_range as u32) == 0
                || codec::find_frac_index(precision, &codec::FRAC_RECORDS) == 0
            {
                bail!(
                    "field {}: float range {full_range} / precision {precision} not representable",
                    field.name
                );
            }
            let param = FloatQuantizeParam::with_delta_range(full_range, delta_range, precision);
            let meta = FieldMeta::new().with_float_quantize(param);
            let scheme = codec::float_scheme_from_meta(&meta);
            let int_record = codec::full_range_record(scheme);
            let frac_record = codec::frac_record(scheme);
            let delta_int_record = codec::delta_range_record(scheme);
            Ok(SchemePlan {
                name: field.name.clone(),
                scheme: scheme.raw(),
                // Presence + sign + integer + fraction.
                full_bits: 2 + int_record.bits + frac_record.bits,
                delta_bits: 2 + delta_int_record.bits + frac_record.bits,
                precision: Some(frac_record.precision),
                meta,
            })
        }
        FieldKind::Quaternion { precision } => {
            if codec::find_frac_index(precision, &codec::QUATERNION_RECORDS) == 0 {
                bail!(
                    "field {}: quaternion precision {precision} not representable",
                    field.name
                );
            }
            let meta = FieldMeta::new()
                .with_quaternion_quantize(QuaternionQuantizeParam::new(precision));
            let scheme = codec::quaternion_scheme_from_meta(&meta);
            let record = codec::quaternion_record(scheme);
            let bits = 3 + 3 * record.bits;
            Ok(SchemePlan {
                name: field.name.clone(),
                scheme: scheme.raw(),
                full_bits: bits,
                delta_bits: bits,
                precision: Some(record.precision),
                meta,
            })
        }
        FieldKind::Int {
            full_range,
            delta_range,
        } => {
            let delta_range = delta_range.unwrap_or(full_range);
            if codec::find_int_index(full_range) == 0 || codec::find_int_index(delta_range) == 0 {
                bail!("field {}: int range {full_range} not representable", field.name);
            }
            let meta = FieldMeta::new()
                .with_int_compress(IntCompressParam::new(full_range, delta_range));
            let scheme = codec::int_scheme_from_meta(&meta);
            Ok(SchemePlan {
                name: field.name.clone(),
                scheme: scheme.raw(),
                full_bits: codec::full_range_record(scheme).bits,
                delta_bits: codec::delta_range_record(scheme).bits,
                precision: None,
                meta,
            })
        }
        FieldKind::Int64 {
            full_range,
            delta_range,
        } => {
            let delta_range = delta_range.unwrap_or(full_range);
            if codec::find_int64_index(full_range) == 0 || codec::find_int64_index(delta_range) == 0
            {
                bail!("field {}: int64 range {full_range} not representable", field.name);
            }
            let meta = FieldMeta::new()
                .with_int64_compress(Int64CompressParam::new(full_range, delta_range));
            let scheme = codec::int64_scheme_from_meta(&meta);
            Ok(SchemePlan {
                name: field.name.clone(),
                scheme: scheme.raw(),
                full_bits: codec::full_range64_record(scheme).bits,
                delta_bits: codec::delta_range64_record(scheme).bits,
                precision: None,
                meta,
            })
        }
    }
}

/// Formats plans as an aligned text table.
#[must_use]
pub fn format_plans_text(plans: &[SchemePlan]) -> String {
    let mut out = String::new();
    out.push_str("field                     scheme      full  delta  precision\n");
    for plan in plans {
        let precision = plan
            .precision
            .map_or_else(|| "exact".to_string(), |p| format!("{p:.7}"));
        out.push_str(&format!(
            "{:<25} 0x{:06X}  {:>6}  {:>5}  {}\n",
            plan.name, plan.scheme, plan.full_bits, plan.delta_bits, precision
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_field(name: &str, full_range: f32, precision: f32) -> FieldConfig {
        FieldConfig {
            name: name.to_string(),
            kind: FieldKind::Float {
                full_range,
                delta_range: None,
                precision,
            },
        }
    }

    #[test]
    fn float_plan_matches_table_records() {
        let plans = plan_fields(&[float_field("pos_x", 100.0, 0.001)]).unwrap();
        assert_eq!(plans.len(), 1);
        let plan = &plans[0];
        assert_ne!(plan.scheme, 0);
        // Presence + sign + 8-bit integer part + 10-bit fraction.
        assert_eq!(plan.full_bits, 2 + 8 + 10);
        assert!(plan.precision.unwrap() <= 0.001);
    }

    #[test]
    fn int_plan_uses_separate_delta_width() {
        let plans = plan_fields(&[FieldConfig {
            name: "ammo".to_string(),
            kind: FieldKind::Int {
                full_range: 1000,
                delta_range: Some(10),
            },
        }])
        .unwrap();
        assert_eq!(plans[0].full_bits, 11);
        assert_eq!(plans[0].delta_bits, 5);
        assert!(plans[0].precision.is_none());
    }

    #[test]
    fn quaternion_plan_counts_three_components() {
        let plans = plan_fields(&[FieldConfig {
            name: "rotation".to_string(),
            kind: FieldKind::Quaternion { precision: 0.001 },
        }])
        .unwrap();
        assert_eq!(plans[0].full_bits, 3 + 3 * 11);
    }

    #[test]
    fn out_of_table_range_is_an_error() {
        let result = plan_fields(&[float_field("bad", 1e9, 0.001)]);
        assert!(result.is_err());

        let result = plan_fields(&[float_field("bad", 1.0, 1e-9)]);
        assert!(result.is_err());
    }

    #[test]
    fn config_json_roundtrip() {
        let json = r#"[
            {"name": "pos_x", "kind": "float", "full_range": 100.0, "precision": 0.001},
            {"name": "ammo", "kind": "int", "full_range": 1000},
            {"name": "rot", "kind": "quaternion", "precision": 0.0001}
        ]"#;
        let fields: Vec<FieldConfig> = serde_json::from_str(json).unwrap();
        let plans = plan_fields(&fields).unwrap();
        assert_eq!(plans.len(), 3);
        let text = format_plans_text(&plans);
        assert!(text.contains("pos_x"));
        assert!(text.contains("ammo"));
        assert!(text.contains("exact"));
    }
}
