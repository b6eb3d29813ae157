use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};
use log::info;
use qubopack_model::{Instance, Model, Sample};
use qubopack_solver::solve_brute_force;
use serde::Serialize;
use std::fs;

fn cli() -> Command {
    let data_file = arg!(<DATA_FILE> "CSV file with one name,weight pair per line")
        .value_parser(clap::value_parser!(String));
    let bin_size = arg!(--"bin-size" <SIZE> "Capacity shared by all bins")
        .value_parser(clap::value_parser!(f64));
    let lagrange = arg!(--lagrange <LAGRANGE> "Penalty weight for the bin-count objective")
        .value_parser(clap::value_parser!(f64))
        .required(false)
        .default_value("2500");
    let bins = arg!(--bins <BINS> "Number of bins (defaults to the item count)")
        .value_parser(clap::value_parser!(usize))
        .required(false);

    Command::new("qubopack")
        .about("Encodes bin packing instances as QUBO cost maps")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("encode")
                .about("Encode a CSV of items and print the cost map as JSON")
                .arg(data_file.clone())
                .arg(bin_size.clone())
                .arg(lagrange.clone())
                .arg(bins.clone()),
        )
        .subcommand(
            Command::new("solve")
                .about("Encode, exhaustively minimize, and report the bins used")
                .arg(data_file)
                .arg(bin_size)
                .arg(lagrange)
                .arg(bins),
        )
}

fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("encode", sub_m)) => encode_cmd(sub_m),
        Some(("solve", sub_m)) => solve_cmd(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn build_model(sub_m: &ArgMatches) -> Result<(Vec<String>, Model)> {
    let data_file = sub_m.get_one::<String>("DATA_FILE").unwrap();
    let bin_size = *sub_m.get_one::<f64>("bin-size").unwrap();
    let lagrange = *sub_m.get_one::<f64>("lagrange").unwrap();
    let bins = sub_m.get_one::<usize>("bins").copied();

    let (names, weights) = read_items(data_file)?;
    let instance = Instance::new(weights, bin_size, bins)?;
    info!(
        "read {} items totalling {} from {}",
        instance.num_items(),
        instance.total_weight(),
        data_file
    );
    let model = Model::encode(&instance, lagrange)?;
    Ok((names, model))
}

fn encode_cmd(sub_m: &ArgMatches) -> Result<()> {
    let (_, model) = build_model(sub_m)?;
    println!("{}", serde_json::to_string_pretty(model.qubo())?);
    Ok(())
}

#[derive(Serialize)]
struct BinReport {
    bin: usize,
    items: Vec<String>,
    load: f64,
    slack: f64,
}

#[derive(Serialize)]
struct SolveReport {
    energy: f64,
    feasible: bool,
    used_bins: Vec<usize>,
    bins: Vec<BinReport>,
    sample: Sample,
}

fn solve_cmd(sub_m: &ArgMatches) -> Result<()> {
    let (names, model) = build_model(sub_m)?;
    let (sample, energy) = solve_brute_force(model.qubo())?;

    let used_bins = model.used_bins(&sample);
    let contents = model.bin_contents(&sample);
    let bins = used_bins
        .iter()
        .map(|&bin| BinReport {
            bin,
            items: contents[bin].iter().map(|&item| names[item].clone()).collect(),
            load: model.bin_load(bin, &sample),
            slack: model.slack_value(bin, &sample),
        })
        .collect();

    let report = SolveReport {
        energy,
        feasible: model.is_feasible(&sample),
        used_bins,
        bins,
        sample,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_items(path: &str) -> Result<(Vec<String>, Vec<f64>)> {
    let data =
        fs::read_to_string(path).with_context(|| format!("cannot read data file '{}'", path))?;
    let mut names = Vec::new();
    let mut weights = Vec::new();
    for (line_no, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (name, weight) = line
            .split_once(',')
            .ok_or_else(|| anyhow!("line {}: expected 'name,weight'", line_no + 1))?;
        let weight = weight
            .trim()
            .parse::<f64>()
            .with_context(|| format!("line {}: cannot parse weight '{}'", line_no + 1, weight.trim()))?;
        names.push(name.trim().to_string());
        weights.push(weight);
    }
    Ok((names, weights))
}
