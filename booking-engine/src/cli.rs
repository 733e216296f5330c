//! 命令行入口 - 读取预订记录，输出提交请求

use crate::{BookingReconciler, Config};
use anyhow::Context;
use clap::Parser;
use shared::booking::BookingRecord;
use shared::error::{ApiResponse, AppError};
use shared::models::Role;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Recompute a booking record and print the request that persists it
#[derive(Debug, Parser)]
#[command(name = "booking-engine", version)]
pub struct Args {
    /// Reconcile as an admin (unbounded discount, may cancel/reopen)
    #[arg(long)]
    pub admin: bool,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,

    /// Print the startup banner on stderr
    #[arg(long)]
    pub banner: bool,

    /// Booking record JSON; reads stdin when omitted
    pub file: Option<PathBuf>,
}

impl Args {
    pub fn role(&self) -> Role {
        if self.admin { Role::Admin } else { Role::Staff }
    }
}

/// Read the booking record from `file`, or stdin when none is given
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Hydrate `input`, recompute it and write the submit request to `out`
///
/// A recompute error is also written to `out` as an [`ApiResponse`] so the
/// calling form can read it.
pub fn run(args: &Args, config: &Config, input: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let role = args.role();
    let ctx = config.reconcile_context(role)?;
    tracing::debug!(role = role.as_str(), environment = %config.environment, "Context ready");

    let record: BookingRecord =
        serde_json::from_str(input).context("Malformed booking record")?;
    let mut reconciler = BookingReconciler::hydrate(record, ctx);

    let request = match reconciler.submit_request() {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Recompute failed");
            let response = ApiResponse::error(&AppError::from(e.clone()));
            writeln!(out, "{}", serde_json::to_string(&response)?)?;
            return Err(e.into());
        }
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&request)?
    } else {
        serde_json::to_string(&request)?
    };
    writeln!(out, "{output}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookingError;
    use serde_json::Value;

    fn args(flags: &[&str]) -> Args {
        let argv = std::iter::once("booking-engine").chain(flags.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    fn default_config() -> Config {
        Config::from_lookup(|_| None)
    }

    fn run_to_json(args: &Args, input: &str) -> (anyhow::Result<()>, Value) {
        let mut out = Vec::new();
        let result = run(args, &default_config(), input, &mut out);
        let json = serde_json::from_slice(&out).unwrap_or(Value::Null);
        (result, json)
    }

    #[test]
    fn test_parse_flags() {
        let parsed = args(&["--admin", "--pretty", "booking.json"]);
        assert_eq!(parsed.role(), Role::Admin);
        assert!(parsed.pretty);
        assert!(!parsed.banner);
        assert_eq!(parsed.file, Some(PathBuf::from("booking.json")));

        assert_eq!(args(&[]).role(), Role::Staff);
    }

    #[test]
    fn test_new_record_is_posted() {
        let input = r#"{"pax": "50", "ratePlan": "Gold", "foodType": "Veg", "discount": 10, "gst": 18}"#;
        let (result, json) = run_to_json(&args(&[]), input);

        assert!(result.is_ok());
        assert_eq!(json["method"], "POST");
        assert_eq!(json["path"], "/bookings");
        assert_eq!(json["body"]["ratePerPlate"], 1327.5);
        assert_eq!(json["body"]["total"], 66375.0);
        assert_eq!(json["body"]["bookingStatus"], "Enquiry");
    }

    #[test]
    fn test_existing_record_is_put() {
        let input = r#"{"_id": "b-5", "pax": 10, "ratePlan": "Silver", "foodType": "Veg", "advance": [{"amount": "1,000"}]}"#;
        let mut out = Vec::new();
        run(&args(&["--pretty"]), &default_config(), input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\n'));
        let json: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["method"], "PUT");
        assert_eq!(json["path"], "/bookings/b-5");
        assert_eq!(json["body"]["balance"], 8500.0);
        assert_eq!(json["body"]["bookingStatus"], "Confirmed");
    }

    #[test]
    fn test_rate_not_found_prints_error_envelope() {
        let input = r#"{"_id": "b-1", "ratePlan": "Diamond", "foodType": "Veg"}"#;
        let (result, json) = run_to_json(&args(&[]), input);

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BookingError>(),
            Some(BookingError::RateNotFound { .. })
        ));
        assert_eq!(json["code"], 6001);
        assert_eq!(json["details"]["ratePlan"], "Diamond");
        assert_eq!(json["details"]["foodType"], "Veg");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_malformed_record_writes_nothing() {
        let mut out = Vec::new();
        let err = run(&args(&[]), &default_config(), "{not json", &mut out).unwrap_err();
        assert!(err.to_string().contains("Malformed booking record"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booking.json");
        std::fs::write(&path, r#"{"pax": 1}"#).unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), r#"{"pax": 1}"#);
        assert!(read_input(Some(&dir.path().join("missing.json"))).is_err());
    }
}
