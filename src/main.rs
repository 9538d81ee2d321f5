//! zseek 命令行入口
//!
//! 每条结果输出一行 JSON，方便编辑器前端或脚本消费。

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;
use zseek::kernel::fuzzy;
use zseek::kernel::services::adapters::{load_settings, ConfigService, LocalFileProvider};
use zseek::kernel::services::ports::{FileInfo, FileProvider, SearchQuery};
use zseek::kernel::{detect, SearchService, SearchSession};

mod logging;

const USAGE: &str = "\
usage:
  zseek detect <file>...
  zseek find <file> <term> [--regex] [--case]
  zseek replace <file> <term> <replacement> [--regex] [--case] [--index N]
  zseek grep <root> <term>
  zseek filter <pattern> [item]...";

#[derive(Debug, Default)]
struct Flags {
    regex: bool,
    case_sensitive: bool,
    index: Option<usize>,
    positional: Vec<String>,
}

fn parse_flags(args: &[String]) -> Result<Flags, String> {
    let mut flags = Flags::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--regex" => flags.regex = true,
            "--case" => flags.case_sensitive = true,
            "--index" => {
                let value = iter.next().ok_or("--index needs a value")?;
                let index = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid --index value: {value}"))?;
                flags.index = Some(index);
            }
            _ => flags.positional.push(arg.clone()),
        }
    }
    Ok(flags)
}

impl Flags {
    fn query(&self, term: &str) -> SearchQuery {
        SearchQuery::new(term)
            .case_sensitive(self.case_sensitive)
            .regex(self.regex)
    }
}

#[derive(Serialize)]
struct DetectLine<'a> {
    path: &'a Path,
    #[serde(flatten)]
    info: FileInfo,
}

fn emit<T: Serialize>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")
}

fn run(args: &[String], out: &mut impl Write) -> Result<(), String> {
    let Some((command, rest)) = args.split_first() else {
        return Err(USAGE.to_string());
    };
    let flags = parse_flags(rest)?;
    let provider = LocalFileProvider::new();
    let io_err = |e: io::Error| e.to_string();

    match command.as_str() {
        "detect" => {
            if flags.positional.is_empty() {
                return Err(USAGE.to_string());
            }
            for path in &flags.positional {
                let path = Path::new(path);
                let info = detect(&provider, path);
                emit(out, &DetectLine { path, info }).map_err(io_err)?;
            }
        }
        "find" => {
            let [path, term] = flags.positional.as_slice() else {
                return Err(USAGE.to_string());
            };
            let document = provider
                .read_file(Path::new(path))
                .map_err(|e| e.to_string())?;
            for m in SearchService::find_all(&document, &flags.query(term)) {
                emit(out, &m).map_err(io_err)?;
            }
        }
        "replace" => {
            let [path, term, replacement] = flags.positional.as_slice() else {
                return Err(USAGE.to_string());
            };
            let document = provider
                .read_file(Path::new(path))
                .map_err(|e| e.to_string())?;
            let query = flags.query(term);
            let replaced = match flags.index {
                Some(index) => {
                    let matches = SearchService::find_all(&document, &query);
                    SearchService::replace_one(&document, &matches, index, &query, replacement)
                }
                None => SearchService::replace_all(&document, &query, replacement),
            };
            out.write_all(replaced.as_bytes()).map_err(io_err)?;
        }
        "grep" => {
            let [root, term] = flags.positional.as_slice() else {
                return Err(USAGE.to_string());
            };
            let config = ConfigService::from_settings(load_settings().unwrap_or_default());
            let provider: Arc<dyn FileProvider> = Arc::new(provider);
            let mut session =
                SearchSession::open(provider, PathBuf::from(root), config.search().clone());
            session.set_query(term, std::time::Instant::now());
            session.flush();
            for result in session.results() {
                emit(out, result).map_err(io_err)?;
            }
        }
        "filter" => {
            let Some((pattern, items)) = flags.positional.split_first() else {
                return Err(USAGE.to_string());
            };
            for idx in fuzzy::filter_indices(pattern, items) {
                emit(out, &items[idx]).map_err(io_err)?;
            }
        }
        _ => return Err(USAGE.to_string()),
    }

    Ok(())
}

fn main() -> ExitCode {
    let _logging = logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let code = match run(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::warn!(error = %message, "command failed");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    };
    let _ = out.flush();
    code
}
