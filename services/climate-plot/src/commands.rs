//! Subcommand implementations.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use climate_frame::{
    anomaly, get_lat_slice, get_time_slice, global_average, temporal_average_for_anomaly, AnnualSeries,
    TemperatureSeries,
};
use netcdf_parser::{load_solar_forcing, load_temperature_series, SolarForcing};
use renderer::{plot_map, plot_time_slice, Coastlines, Figure, MapAxes, Rect};
use tracing::info;

use crate::config::FigureConfig;

/// Render one model year, or its departure from the all-years mean, to PNG.
pub fn render_map(
    input: &Path,
    variable: &str,
    year: i64,
    show_anomaly: bool,
    config: &FigureConfig,
    output: &Path,
) -> Result<()> {
    let series = load_series(input, variable)?;

    let mut figure = Figure::with_style(config.width, config.height, config.style.clone())?;
    let mut axes = figure_axes(config)?;

    let contours = if show_anomaly {
        let slice = get_time_slice(&series, year)?;
        let baseline = temporal_average_for_anomaly(&series);
        let departure = anomaly(&slice, &baseline)?;
        axes.set_title(format!("Year {} anomaly", year));
        plot_map(&departure, &mut figure, &mut axes, config.vmin, config.vmax, config.colorbar)?
    } else if config.colorbar {
        plot_time_slice(&series, year, &mut figure, &mut axes, config.vmin, config.vmax)?
    } else {
        let slice = get_time_slice(&series, year)?;
        axes.set_title(format!("Year {}", year));
        plot_map(&slice, &mut figure, &mut axes, config.vmin, config.vmax, false)?
    };

    figure
        .save_png(output)
        .with_context(|| format!("Failed to write {:?}", output))?;
    info!(
        year,
        anomaly = show_anomaly,
        levels = contours.levels().len(),
        output = %output.display(),
        "Rendered map"
    );
    Ok(())
}

/// Axes filling the figure, leaving room for the title and colorbar.
fn figure_axes(config: &FigureConfig) -> Result<MapAxes> {
    let style = &config.style;
    let right = if config.colorbar { style.colorbar_margin() } else { 8.0 };
    let rect = Rect::new(0.0, 0.0, config.width as f32, config.height as f32)
        .inset(8.0, style.title_margin(), right, 8.0);

    let mut axes = MapAxes::new(rect).with_projection(config.projection);
    axes.set_central_longitude(config.central_longitude);
    if let Some(path) = &config.coastlines {
        let coast = Coastlines::load(path).with_context(|| format!("Failed to load coastlines from {:?}", path))?;
        axes.set_coastlines(Some(coast));
    }
    Ok(axes)
}

/// Options for the `global-average` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageOptions {
    pub window: usize,
    pub center: bool,
    pub lat_band: Option<(f64, f64)>,
}

/// Write `time,year,mean,rolling_mean` rows for the area-mean series.
pub fn write_global_average(input: &Path, variable: &str, options: AverageOptions, out: impl Write) -> Result<()> {
    let series = load_series(input, variable)?;
    let series = match options.lat_band {
        Some((lower, upper)) if lower > upper => bail!("Latitude band {}..{} is empty", lower, upper),
        Some((lower, upper)) => get_lat_slice(&series, lower, upper),
        None => series,
    };
    if series.is_empty() {
        bail!("No records left to average in {:?}", input);
    }

    let means = global_average(&series);
    let rolled = means.rolling(options.window, options.center)?;
    write_average_csv(&means, &rolled, out)
}

pub fn average_csv_header() -> &'static str {
    "time,year,mean,rolling_mean"
}

fn write_average_csv(means: &AnnualSeries, rolled: &AnnualSeries, mut out: impl Write) -> Result<()> {
    writeln!(out, "{}", average_csv_header())?;
    for ((key, mean), (_, smooth)) in means.iter().zip(rolled.iter()) {
        writeln!(out, "{},{},{},{}", key.value(), key.year(), mean, csv_number(smooth))?;
    }
    out.flush()?;
    Ok(())
}

/// Write the `time,tsi,time_yr` solar-forcing table.
pub fn write_forcing(input: &Path, out: impl Write) -> Result<()> {
    let forcing = load_solar_forcing(input).with_context(|| format!("Failed to load forcing from {:?}", input))?;
    write_forcing_csv(&forcing, out)
}

fn write_forcing_csv(forcing: &SolarForcing, mut out: impl Write) -> Result<()> {
    writeln!(out, "{}", SolarForcing::columns().join(","))?;
    for row in forcing.iter() {
        writeln!(out, "{},{},{}", row.time, row.tsi, row.time_yr)?;
    }
    out.flush()?;
    Ok(())
}

fn load_series(input: &Path, variable: &str) -> Result<TemperatureSeries> {
    load_temperature_series(input, variable)
        .with_context(|| format!("Failed to load {} from {:?}", variable, input))
}

/// Empty field for undefined values.
fn csv_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_frame::TimeKey;
    use netcdf_parser::ForcingRecord;

    #[test]
    fn test_average_csv_rows() {
        let means = AnnualSeries::from_pairs((1..=3).map(|y| (TimeKey::from_year(y), y as f64)));
        let rolled = means.rolling(3, true).unwrap();

        let mut out = Vec::new();
        write_average_csv(&means, &rolled, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "time,year,mean,rolling_mean");
        assert_eq!(lines[1], "10716,1,1,");
        assert_eq!(lines[2], "20716,2,2,2");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_forcing_csv_rows() {
        let forcing: SolarForcing = [ForcingRecord::new(15000.0, 1361.5), ForcingRecord::new(25000.0, 1360.0)]
            .into_iter()
            .collect();

        let mut out = Vec::new();
        write_forcing_csv(&forcing, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "time,tsi,time_yr\n15000,1361.5,2\n25000,1360,2\n");
    }

    #[test]
    fn test_axes_leave_colorbar_room() {
        let config = FigureConfig::default();
        let with_bar = figure_axes(&config).unwrap();
        let without = figure_axes(&FigureConfig {
            colorbar: false,
            ..config
        })
        .unwrap();
        assert!(with_bar.rect().width < without.rect().width);
    }
}
