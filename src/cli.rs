// src/cli.rs
use std::{env, path::PathBuf};

use anyhow::{Context, Result, bail};
use log::info;

use crate::{file, params::Params, runner, util};

pub fn run() -> Result<()> {
    let params = parse_cli(env::args().skip(1))?;

    let Some(input) = params.input.clone() else {
        bail!("missing snapshot path (use -f <file>, or --help)");
    };
    let doc = file::read_snapshot(&input)?;
    let report = runner::run(&doc, &params.signal(), &params);

    if params.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.summary());
    }

    if params.out.is_some() {
        let path = file::write_report(&report, params.out.as_deref())?;
        info!("report written to {}", path.display());
    }

    Ok(())
}

fn parse_cli(mut args: impl Iterator<Item = String>) -> Result<Params> {
    let mut params = Params::new();

    while let Some(a) = args.next() {
        match a.as_str() {
            "-f" | "--file" => {
                let v = args.next().context("Missing value for --file")?;
                params.input = Some(PathBuf::from(v));
            }
            "-d" | "--date" => {
                let v = args.next().context("Missing value for --date")?;
                params.date = util::query_date(Some(&v));
            }
            "--friday" => params.date = util::this_friday(),
            "--target" => {
                let v = args.next().context("Missing value for --target")?;
                params.target = v.parse().context("Bad --target, expected hours")?;
            }
            "--tolerance" => {
                let v = args.next().context("Missing value for --tolerance")?;
                params.tolerance = v.parse().context("Bad --tolerance, expected hours")?;
            }
            "-o" | "--out" => {
                params.out = Some(PathBuf::from(args.next().context("Missing output dir")?));
            }
            "--json" => params.json = true,
            "--url" => params.url = Some(args.next().context("Missing value for --url")?),
            "--status" => {
                let v = args.next().context("Missing value for --status")?;
                params.status = Some(v.parse().context("Bad --status, expected HTTP code")?);
            }
            "--title" => params.title = Some(args.next().context("Missing value for --title")?),
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {}", a),
        }
    }

    Ok(params)
}
