use gem_dashboard::data::{
    f64_column, str_column, DataCleaner, DataLoader, CARAT, PRICE, PRICE_BAND, PRICE_PER_CARAT,
    VALUE_CATEGORY,
};
use gem_dashboard::{Pipeline, PipelineConfig, PipelineError};
use std::path::{Path, PathBuf};

fn config_for(input: PathBuf, out: &Path) -> PipelineConfig {
    PipelineConfig {
        input_path: input,
        output_dir: out.join("outputs"),
        ..Default::default()
    }
}

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/diamonds_sample.csv")
}

#[test]
fn worked_example_flows_through_to_export() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("gems.csv");
    std::fs::write(
        &input,
        "carat,cut,color,price\n1.0, ideal ,E,3000\n1.0,Ideal,E,3000\n0,Good,F,500\n",
    )?;

    let pipeline = Pipeline::new(config_for(input, dir.path()));
    let df = pipeline.extract()?;
    let (df, report) = pipeline.clean(df)?;
    assert_eq!(report.input_rows, 3);
    assert_eq!(report.output_rows, 1);

    let mut df = pipeline.transform(df)?;
    let analysis = pipeline.analyse(&df)?;
    assert_eq!(analysis.price_by_cut.len(), 1);
    assert_eq!(analysis.price_by_cut[0].group, "Ideal");
    assert!(analysis.correlation.r.is_nan());

    let out = pipeline.export(&mut df)?;
    let text = std::fs::read_to_string(&out)?;
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("carat,cut,color,price,price_per_carat,value_category,price_band")
    );
    assert_eq!(lines.next(), Some("1.0,Ideal,E,3000.0,3000.0,Mid-Range,$2k+"));
    assert_eq!(lines.next(), None);
    Ok(())
}

#[test]
fn sample_dataset_satisfies_cleaning_invariants() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let pipeline = Pipeline::new(config_for(sample_path(), dir.path()));

    let raw = pipeline.extract()?;
    let overview = pipeline.explore(&raw)?;
    assert_eq!(overview.rows, raw.height());
    assert_eq!(overview.total_missing(), 2);

    let (clean, report) = pipeline.clean(raw)?;
    assert!(report.output_rows <= report.input_rows);
    assert!(report.duplicates_removed >= 2);
    assert_eq!(DataCleaner::deduplicate(clean.clone())?.height(), clean.height());

    let mut df = pipeline.transform(clean)?;
    let prices = f64_column(&df, PRICE)?;
    let carats = f64_column(&df, CARAT)?;
    let per_carat = f64_column(&df, PRICE_PER_CARAT)?;
    for ((price, carat), ppc) in prices.iter().zip(&carats).zip(&per_carat) {
        let (price, carat, ppc) = (price.unwrap(), carat.unwrap(), ppc.unwrap());
        assert!(price > 0.0 && carat > 0.0);
        assert_eq!(ppc, (price / carat * 100.0).round_ties_even() / 100.0);
    }
    assert!(str_column(&df, VALUE_CATEGORY)?.iter().all(Option::is_some));

    let analysis = pipeline.analyse(&df)?;
    let counted: usize = analysis.category_counts.iter().map(|(_, n)| n).sum();
    assert_eq!(counted, df.height());

    let out = pipeline.export(&mut df)?;
    let exported = DataLoader::load_csv(&out)?;
    assert_eq!(exported.height(), df.height());
    assert_eq!(
        DataLoader::get_columns(&exported),
        vec![
            "carat",
            "cut",
            "color",
            "clarity",
            "price",
            "price_per_carat",
            "value_category",
            "price_band"
        ]
    );
    assert_eq!(str_column(&exported, PRICE_BAND)?.len(), df.height());
    Ok(())
}

#[test]
fn missing_input_aborts_with_data_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path().join("absent.csv"), dir.path());
    let cleaned = config.cleaned_path();
    let dashboard = config.dashboard_path();

    let err = Pipeline::new(config).run().unwrap_err();
    assert!(matches!(err, PipelineError::DataAccess { .. }));
    assert!(!cleaned.exists());
    assert!(!dashboard.exists());
}

#[test]
fn full_run_on_sample_writes_dashboard_and_cleaned_csv() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let summary = Pipeline::new(config_for(sample_path(), dir.path())).run()?;

    assert!(summary.cleaning.output_rows > 0);
    assert!(summary.cleaning.output_rows < summary.rows_loaded);
    assert!(std::fs::metadata(&summary.dashboard_path)?.len() > 0);

    let exported = DataLoader::load_csv(&summary.cleaned_path)?;
    assert_eq!(exported.height(), summary.cleaning.output_rows);
    Ok(())
}

#[test]
fn full_run_with_every_row_filtered_still_writes_outputs() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("gems.csv");
    std::fs::write(
        &input,
        "carat,cut,color,price
0,Good,F,500
1.0,Ideal,E,-5
0.5,Fair,,700
",
    )?;

    let summary = Pipeline::new(config_for(input, dir.path())).run()?;

    assert_eq!(summary.rows_loaded, 3);
    assert_eq!(summary.cleaning.output_rows, 0);
    assert!(summary.dashboard_path.exists());
    assert!(std::fs::metadata(&summary.dashboard_path)?.len() > 0);

    let text = std::fs::read_to_string(&summary.cleaned_path)?;
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec!["carat,cut,color,price,price_per_carat,value_category,price_band"]
    );
    Ok(())
}
