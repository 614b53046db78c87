//! # Seed Data Loader
//!
//! Populates the database with sample fundamentals for development, or
//! bulk-loads bundle JSON documents from a directory.
//!
//! ## Usage
//! ```bash
//! # Load the built-in sample companies
//! cargo run -p fundstore-db --bin seed
//!
//! # Specify database path
//! cargo run -p fundstore-db --bin seed -- --db ./data/fundamentals.db
//!
//! # Bulk-load pipeline output, skipping bad records
//! cargo run -p fundstore-db --bin seed -- --dir ./bundles --best-effort
//! ```
//!
//! ## Built-in Samples
//! Three companies with realistic figures, one bundle each:
//! - Sun Pharmaceutical Industries (full bundle, every section)
//! - HDFC Bank (company info, shareholding, key ratios)
//! - Reliance Industries (company info, cash flow)

use std::env;
use std::fs;

use fundstore_core::{
    BalanceSheet, CashFlow, Company, CompanyBundle, FinancialResult, KeyRatios,
    ManagementDiscussion, PricePerformance, Recommendation, ShareholdingPattern,
};
use fundstore_db::{Database, DbConfig, LoadMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./fundamentals_dev.db");
    let mut bundle_dir: Option<String> = None;
    let mut mode = LoadMode::Strict;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--dir" => {
                if i + 1 < args.len() {
                    bundle_dir = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--best-effort" => {
                mode = LoadMode::BestEffort;
            }
            "--help" | "-h" => {
                println!("Fundamentals Store Seed Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./fundamentals_dev.db)");
                println!("      --dir <PATH>   Load *.json bundle files from a directory");
                println!("                     instead of the built-in samples");
                println!("      --best-effort  Skip bad records and report them at the end");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Fundamentals Store Seed Loader");
    println!("=================================");
    println!("Database: {}", db_path);
    println!(
        "Mode:     {}",
        match mode {
            LoadMode::Strict => "strict",
            LoadMode::BestEffort => "best-effort",
        }
    );
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;
    let store = db.store();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let bundles = match &bundle_dir {
        Some(dir) => read_bundle_dir(dir)?,
        None => sample_bundles(),
    };

    println!("Loading {} bundle(s)...", bundles.len());
    let start = std::time::Instant::now();

    let report = store.load_bundles(&bundles, mode).await?;

    let elapsed = start.elapsed();
    println!();
    println!("✓ Loaded {} records in {:?}", report.loaded, elapsed);

    if !report.mismatches.is_empty() {
        println!();
        println!("⚠ {} derivation mismatch(es):", report.mismatches.len());
        for m in &report.mismatches {
            println!("  {}", m);
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("⚠ {} record(s) rejected:", report.errors.len());
        for e in &report.errors {
            println!("  {}", e);
        }
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Reads every `*.json` file in a directory as one bundle, stamping the
/// file name into rows that lack a `data_source`.
fn read_bundle_dir(dir: &str) -> Result<Vec<CompanyBundle>, Box<dyn std::error::Error>> {
    let mut bundles = Vec::new();

    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    for path in entries {
        let json = fs::read_to_string(&path)?;
        let mut bundle = CompanyBundle::from_json(&json)?;
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            bundle.stamp_data_source(name);
        }
        bundles.push(bundle);
    }

    Ok(bundles)
}

// =============================================================================
// Built-in Samples
// =============================================================================

fn sample_bundles() -> Vec<CompanyBundle> {
    vec![sun_pharma(), hdfc_bank(), reliance()]
}

/// Full bundle: every section populated.
fn sun_pharma() -> CompanyBundle {
    let source = Some("SP20241006_SUNPHARMA.pdf".to_string());

    CompanyBundle {
        company_info: Company {
            company_id: 1,
            company_name: "Sun Pharmaceutical Industries Limited".to_string(),
            bse_code: Some("524715".to_string()),
            nse_code: Some("SUNPHARMA".to_string()),
            bloomberg_code: Some("SUNP:IN".to_string()),
            sector: Some("Pharmaceuticals".to_string()),
            market_cap_cr: Some(351905.0),
            enterprise_value_cr: Some(344089.0),
            outstanding_shares_cr: Some(239.9),
            beta: Some(0.6),
            face_value_rs: Some(1.0),
            year_high_price_rs: Some(1639.4),
            year_low_price_rs: Some(938.7),
            data_source: source.clone(),
        },
        shareholding: Some(ShareholdingPattern {
            company_id: 1,
            quarter: "Q4FY24".to_string(),
            promoter_holding_pct: Some(54.48),
            fii_holding_pct: Some(17.6),
            mf_insti_holding_pct: Some(19.3),
            public_holding_pct: Some(8.62),
            others_holding_pct: None,
            data_source: source.clone(),
        }),
        price_performance: Some(PricePerformance {
            company_id: 1,
            period: "Q2FY25".to_string(),
            absolute_return_3m_pct: Some(21.5),
            absolute_return_6m_pct: Some(18.4),
            absolute_return_1y_pct: Some(63.0),
            sensex_return_3m_pct: Some(6.6),
            sensex_return_6m_pct: Some(11.7),
            sensex_return_1y_pct: Some(24.3),
            relative_return_3m_pct: Some(14.9),
            relative_return_6m_pct: Some(6.7),
            relative_return_1y_pct: Some(38.7),
            data_source: source.clone(),
        }),
        financial_results: Some(FinancialResult {
            financial_id: 1,
            company_id: 1,
            fiscal_period: "Q2FY25".to_string(),
            revenue_cr: Some(11813.0),
            yoy_growth_revenue_pct: Some(9.1),
            ebitda_cr: Some(3440.0),
            ebitda_margin_pct: Some(29.12),
            net_profit_cr: Some(2756.0),
            net_profit_margin_pct: Some(23.33),
            eps_rs: Some(11.5),
            data_source: source.clone(),
        }),
        balance_sheet: Some(BalanceSheet {
            balance_sheet_id: 1,
            company_id: 1,
            fiscal_period: "FY24".to_string(),
            total_assets_cr: Some(91613.0),
            total_liabilities_cr: Some(22473.0),
            current_assets_cr: Some(42110.0),
            cash_cr: Some(12022.0),
            inventories_cr: Some(10393.0),
            accounts_receivable_cr: Some(10997.0),
            accounts_payable_cr: Some(6295.0),
            long_term_debt_cr: Some(2285.0),
            shareholder_equity_cr: Some(69140.0),
            data_source: source.clone(),
        }),
        cash_flow: Some(CashFlow {
            cash_flow_id: 1,
            company_id: 1,
            fiscal_period: "FY24".to_string(),
            net_cash_from_operations_cr: Some(13023.0),
            net_cash_from_investing_cr: Some(-5337.0),
            net_cash_from_financing_cr: Some(-4175.0),
            capex_cr: Some(2920.0),
            free_cash_flow_cr: Some(10103.0),
            data_source: source.clone(),
        }),
        key_ratios: Some(KeyRatios {
            ratio_id: 1,
            company_id: 1,
            fiscal_period: "FY24".to_string(),
            pe_x: Some(36.7),
            pb_x: Some(5.1),
            ev_ebitda_x: Some(24.2),
            roe_pct: Some(14.8),
            roce_pct: Some(17.1),
            dividend_yield_pct: Some(0.9),
            data_source: source.clone(),
        }),
        management_discussion: Some(ManagementDiscussion {
            discussion_id: 1,
            company_id: 1,
            fiscal_period: "Q2FY25".to_string(),
            topic: Some("Specialty portfolio".to_string()),
            discussion_text: Some(
                "Global specialty sales continued to ramp, led by dermatology \
                 and ophthalmology franchises."
                    .to_string(),
            ),
            data_source: source.clone(),
        }),
        recommendations: Some(Recommendation {
            recommendation_id: 1,
            company_id: 1,
            rating: Some("BUY".to_string()),
            target_price_rs: Some(1980.0),
            time_horizon_months: Some(12),
            data_source: source,
        }),
    }
}

/// Partial bundle: no statement sections.
fn hdfc_bank() -> CompanyBundle {
    let source = Some("SP20241012_HDFCBANK.pdf".to_string());

    CompanyBundle {
        company_info: Company {
            company_id: 2,
            company_name: "HDFC Bank Limited".to_string(),
            bse_code: Some("500180".to_string()),
            nse_code: Some("HDFCBANK".to_string()),
            bloomberg_code: Some("HDFCB:IN".to_string()),
            sector: Some("Banking".to_string()),
            market_cap_cr: Some(1284550.0),
            enterprise_value_cr: None,
            outstanding_shares_cr: Some(761.0),
            beta: Some(0.9),
            face_value_rs: Some(1.0),
            year_high_price_rs: Some(1794.0),
            year_low_price_rs: Some(1363.45),
            data_source: source.clone(),
        },
        shareholding: Some(ShareholdingPattern {
            company_id: 2,
            quarter: "Q1FY25".to_string(),
            promoter_holding_pct: Some(0.0),
            fii_holding_pct: Some(47.17),
            mf_insti_holding_pct: Some(35.4),
            public_holding_pct: Some(17.43),
            others_holding_pct: None,
            data_source: source.clone(),
        }),
        price_performance: None,
        financial_results: None,
        balance_sheet: None,
        cash_flow: None,
        key_ratios: Some(KeyRatios {
            ratio_id: 2,
            company_id: 2,
            fiscal_period: "FY24".to_string(),
            pe_x: Some(19.1),
            pb_x: Some(2.8),
            ev_ebitda_x: None,
            roe_pct: Some(17.1),
            roce_pct: None,
            dividend_yield_pct: Some(1.2),
            data_source: source,
        }),
        management_discussion: None,
        recommendations: None,
    }
}

/// Minimal bundle: company plus one cash-flow year.
fn reliance() -> CompanyBundle {
    let source = Some("SP20241019_RELIANCE.pdf".to_string());

    CompanyBundle {
        company_info: Company {
            company_id: 3,
            company_name: "Reliance Industries Limited".to_string(),
            bse_code: Some("500325".to_string()),
            nse_code: Some("RELIANCE".to_string()),
            bloomberg_code: Some("RIL:IN".to_string()),
            sector: Some("Conglomerate".to_string()),
            market_cap_cr: Some(1844000.0),
            enterprise_value_cr: None,
            outstanding_shares_cr: Some(676.6),
            beta: Some(1.1),
            face_value_rs: Some(10.0),
            year_high_price_rs: Some(3217.9),
            year_low_price_rs: Some(2221.05),
            data_source: source.clone(),
        },
        shareholding: None,
        price_performance: None,
        financial_results: None,
        balance_sheet: None,
        cash_flow: Some(CashFlow {
            cash_flow_id: 3,
            company_id: 3,
            fiscal_period: "FY24".to_string(),
            net_cash_from_operations_cr: Some(65336.0),
            net_cash_from_investing_cr: Some(-71616.0),
            net_cash_from_financing_cr: Some(8859.0),
            capex_cr: Some(37667.0),
            free_cash_flow_cr: Some(27669.0),
            data_source: source,
        }),
        key_ratios: None,
        management_discussion: None,
        recommendations: None,
    }
}
