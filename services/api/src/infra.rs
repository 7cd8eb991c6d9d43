use biz_finder::config::AppConfig;
use biz_finder::error::AppError;
use biz_finder::telemetry;
use biz_finder::workflows::catalog::ProgramCatalogImporter;
use biz_finder::workflows::eligibility::{
    EligibilityService, ProgramCatalog, ScoringConfig, Sector,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the program table from CSV when a path is given, else the built-in table.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<ProgramCatalog, AppError> {
    let Some(path) = path else {
        return Ok(ProgramCatalog::standard());
    };

    let catalog = ProgramCatalogImporter::from_path(path)?;
    info!(
        path = %path.display(),
        programs = catalog.entries().len(),
        "program catalog imported"
    );
    Ok(catalog)
}

pub(crate) fn build_service(catalog_path: Option<&Path>) -> Result<EligibilityService, AppError> {
    let catalog = load_catalog(catalog_path)?;
    Ok(EligibilityService::new(ScoringConfig::standard(), catalog))
}

/// Configuration for the one-shot commands, with logging routed to stderr.
pub(crate) fn load_cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

/// Builds the service from `--catalog` when given, else from `APP_PROGRAM_CATALOG`.
pub(crate) fn service_for(
    catalog_flag: Option<PathBuf>,
    config: &AppConfig,
) -> Result<EligibilityService, AppError> {
    let path = catalog_flag.or_else(|| config.catalog.path.clone());
    build_service(path.as_deref())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_sector(raw: &str) -> Result<Sector, String> {
    Sector::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = Sector::ALL.iter().map(|sector| sector.key()).collect();
        format!("unknown sector '{raw}' (expected one of {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use biz_finder::config::{
        AppEnvironment, CatalogConfig, ServerConfig, TelemetryConfig,
    };

    const BUNDLED_CATALOG: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../crates/biz-finder/data/program_catalog.csv"
    );

    fn config_with_catalog(path: Option<&str>) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".into(),
            },
            catalog: CatalogConfig {
                path: path.map(PathBuf::from),
            },
        }
    }

    #[test]
    fn missing_catalog_path_uses_builtin_table() {
        let catalog = load_catalog(None).expect("builtin catalog");
        assert_eq!(catalog, ProgramCatalog::standard());
    }

    #[test]
    fn unreadable_catalog_is_reported() {
        let error = load_catalog(Some(Path::new("./no-such-catalog.csv")))
            .expect_err("missing file");
        assert!(matches!(error, AppError::Catalog(_)));
    }

    #[test]
    fn configured_catalog_is_used_without_a_flag() {
        let config = config_with_catalog(Some("./configured-catalog-missing.csv"));

        let error = service_for(None, &config).expect_err("configured path is read");
        assert!(matches!(error, AppError::Catalog(_)));

        let service = service_for(None, &config_with_catalog(Some(BUNDLED_CATALOG)))
            .expect("configured catalog imports");
        assert_eq!(service.catalog(), &ProgramCatalog::standard());
    }

    #[test]
    fn catalog_flag_overrides_configured_catalog() {
        let config = config_with_catalog(Some("./configured-catalog-missing.csv"));

        let service = service_for(Some(PathBuf::from(BUNDLED_CATALOG)), &config)
            .expect("flag wins over configuration");
        assert_eq!(service.catalog().entries().len(), 5);

        let service = service_for(None, &config_with_catalog(None)).expect("builtin table");
        assert_eq!(service.catalog(), &ProgramCatalog::standard());
    }

    #[test]
    fn cli_config_installs_a_log_subscriber() {
        load_cli_config().expect("default configuration loads");
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert_eq!(
            parse_date(" 2025-03-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"))
        );
        assert!(parse_date("03/01/2025").is_err());
    }

    #[test]
    fn parse_sector_lists_known_keys() {
        assert_eq!(parse_sector("IT/SW"), Ok(Sector::ItSoftware));
        let error = parse_sector("mining").expect_err("unknown");
        assert!(error.contains("wholesale_retail"));
    }
}
