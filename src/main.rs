use clap::Parser;
use disksweep::bench::SweepDriver;
use disksweep::cli::Cli;
use disksweep::config::persistence::ResultsStorage;
use disksweep::config::SweepConfig;
use disksweep::io::create_strategy;
use disksweep::models::RunRecord;
use disksweep::plot;
use disksweep::util::units::format_bytes;
use disksweep::volume::{RamVolume, VolumeConfig};
use disksweep::Result;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::{Duration, Instant};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let base = SweepConfig::load()?;
    let save_config = cli.save_config;
    let no_save = cli.no_save;
    let target = cli.target.clone();
    let config = cli.into_config(base);
    config.validate()?;

    if save_config {
        config.save()?;
        println!("Configuration saved to {}", SweepConfig::config_file_path()?.display());
    }

    print_config(&config);

    let volume = if config.use_ram_disk {
        Some(RamVolume::create(&VolumeConfig::default())?)
    } else {
        None
    };
    let target_dir = volume
        .as_ref()
        .map(|v| v.mount_path().to_path_buf())
        .unwrap_or(target);

    let driver = SweepDriver::new(config.clone(), create_strategy(config.strategy), &target_dir);

    let bar = ProgressBar::new(config.point_count());
    let started = Instant::now();
    let outcome = driver.run_with(|point| {
        bar.println(format!(
            "Size: {} | Write: {:.2} MB/s | Read: {:.2} MB/s",
            format_bytes(point.size_bytes),
            point.write_speed_mbs,
            point.read_speed_mbs
        ));
        bar.inc(1);
    });
    bar.finish_and_clear();

    let series = match outcome {
        Ok(series) => series,
        Err(err) => {
            // Best-effort teardown; the I/O failure is the error to report.
            if let Some(volume) = volume {
                let _ = volume.eject();
            }
            return Err(err);
        }
    };

    if config.plot {
        let plot_path = Path::new("speed_graph.svg");
        plot::render_svg(&series, plot_path)?;
        println!("The plot saved in {}", plot_path.display());
    }

    if !no_save {
        let storage = ResultsStorage::new()?;
        storage.append_run(RunRecord::new(config.clone(), series.clone()))?;
        println!("Results appended to {}", storage.path().display());
    }

    let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
    println!(
        "Completed {} size points in {}",
        series.len(),
        humantime::format_duration(elapsed)
    );

    if let Some(volume) = volume {
        volume.eject()?;
    }

    Ok(())
}

fn print_config(config: &SweepConfig) {
    let no_yes = |flag: bool| if flag { "yes" } else { "no" };
    println!("Configuration:");
    println!("  Function:      {}", config.strategy);
    println!("  Min size:      {}", format_bytes(config.min_size));
    println!("  Max size:      {}", format_bytes(config.max_size));
    println!("  Stride size:   {}", format_bytes(config.stride_size));
    println!("  Memory buffer: {}", format_bytes(config.buffer_size));
    println!("  Iterations:    {}", config.iterations);
    println!("  Use RAM disk:  {}", no_yes(config.use_ram_disk));
    println!("  Plot graph:    {}", no_yes(config.plot));
}
