//! Command-line interface for sumdata
//! This binary builds headline summarization datasets from parsed Gigaword and DUC data.
//!
//! Usage:
//!   sumdata extract `<input>` `<out-dir>`          - Gigaword file to record file
//!   sumdata dict `<input>` `<prefix>` `<min-count>` - Title and article dictionaries
//!   sumdata filter `<input>`                      - Keep good records (stdout)
//!   sumdata pull `<mode>` `<dict>`                - Project one field (stdin to stdout)
//!   sumdata duc --sum-docs ...                    - Build the DUC test set
//!   sumdata rouge --base ...                      - Lay out files for ROUGE
//!   sumdata sweep `<src>` `<model>`               - Run the decoder with a params file
//!
//! Settings come from the built-in defaults, then `./sumdata.toml` if present, then the file
//! given with `--config <file>`. Extract flags override all three.
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use sumdata_config::{ConfigError, Loader, SumdataConfig, LOCAL_CONFIG};
use sumdata_parser::agiga::{
    extract_file, extract_to_writer, open_corpus, ExtractOptions, IncompletePolicy,
};
use sumdata_parser::dataset::{
    DictOptions, DictionaryBuilder, FilterOptions, ProjectionMode, Projector, QualityFilter,
    Vocabulary,
};
use sumdata_parser::duc::{build_test_set, rouge_layout, DucOptions, DucPaths, RougePaths};
use sumdata_parser::record::RecordFormat;
use sumdata_parser::sweep::{self, SweepOptions};
use sumdata_parser::{Error, Result};

fn main() {
    env_logger::init();
    let matches = build_cli().get_matches();
    let (name, sub) = matches.subcommand().expect("a subcommand is required");

    let config = load_config(name, sub).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let result = match name {
        "extract" => handle_extract_command(sub, &config),
        "dict" => handle_dict_command(sub, &config),
        "filter" => handle_filter_command(sub, &config),
        "pull" => handle_pull_command(sub, &config),
        "duc" => handle_duc_command(sub, &config),
        "rouge" => handle_rouge_command(sub),
        "sweep" => handle_sweep_command(sub, &config),
        other => unreachable!("unknown subcommand {}", other),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("sumdata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build headline summarization datasets from parsed news corpora")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract title/article records from an Annotated Gigaword file")
                .arg(
                    Arg::new("input")
                        .help("Parsed Gigaword file, plain or .gz")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("out-dir")
                        .help("Output root; records go to <out-dir>/<parent dir>/<stem>.txt")
                        .required_unless_present("stdout")
                        .value_parser(value_parser!(PathBuf))
                        .index(2),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Write records to stdout instead of a file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("flush-incomplete")
                        .long("flush-incomplete")
                        .help("Emit a document left open at end of file instead of dropping it")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Record format (default from config: tsv)")
                        .value_parser(["tsv", "json"]),
                ),
        )
        .subcommand(
            Command::new("dict")
                .about("Write title and article dictionaries for a record file")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(1),
                )
                .arg(
                    Arg::new("prefix")
                        .help("Writes <prefix>.article.dict and <prefix>.title.dict")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(2),
                )
                .arg(
                    Arg::new("min-count")
                        .help("Stop at the first word seen fewer times than this")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .index(3),
                ),
        )
        .subcommand(
            Command::new("filter")
                .about("Print the records that pass the quality filter")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("pull")
                .about("Project one view of each record read from stdin")
                .arg(
                    Arg::new("mode")
                        .required(true)
                        .help("One of: src, trg, src_lc, trg_lc, srctree, interleave")
                        .index(1),
                )
                .arg(
                    Arg::new("dict")
                        .help("Dictionary used to map unknown words in the *_lc modes")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("duc")
                .about("Build the DUC task-1 test set")
                .arg(path_option("sum-docs", "Directory of DUC docsets"))
                .arg(path_option("result-docs", "Directory of reference summaries"))
                .arg(path_option("ref-dir", "Where task1_ref<i>.txt are written"))
                .arg(path_option("sys-dir", "Where task1_prefix.txt is written"))
                .arg(path_option("article-file", "Where the input sentences are written"))
                .arg(
                    Arg::new("year")
                        .long("year")
                        .help("DUC year; 2003 changes reference naming")
                        .default_value("2004"),
                ),
        )
        .subcommand(
            Command::new("rouge")
                .about("Lay out references and system output for ROUGE")
                .arg(path_option("base", "Directory holding references/ and system/"))
                .arg(path_option("gold", "Output directory for gold summaries"))
                .arg(path_option("system", "Output directory for system summaries"))
                .arg(path_option("input", "Input sentences, one per system line")),
        )
        .subcommand(
            Command::new("sweep")
                .about("Run the summarization decoder with one parameter setting")
                .arg(Arg::new("src").required(true).index(1))
                .arg(Arg::new("model").required(true).index(2))
                .arg(
                    Arg::new("params")
                        .long("params")
                        .help("File of `name value` lines (default from config)")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the command instead of running it")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn path_option(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn load_config(
    name: &str,
    matches: &ArgMatches,
) -> std::result::Result<SumdataConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if name == "extract" {
        if matches.get_flag("flush-incomplete") {
            loader = loader.set_override("extract.incomplete", "flush")?;
        }
        if let Some(format) = matches.get_one::<String>("format") {
            loader = loader.set_override("extract.format", format.as_str())?;
        }
    }
    loader.build()
}

fn path_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a Path {
    matches
        .get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .expect("path arguments are required")
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::io_at(path, e))?;
    Ok(BufReader::new(file))
}

fn extract_options(config: &SumdataConfig) -> Result<ExtractOptions> {
    Ok(ExtractOptions {
        digit_placeholder: config.extract.digit_placeholder.clone(),
        root_label: config.extract.root_label.clone(),
        incomplete: IncompletePolicy::from_name(&config.extract.incomplete)?,
    })
}

/// Handle the extract command
fn handle_extract_command(matches: &ArgMatches, config: &SumdataConfig) -> Result<()> {
    let input = path_arg(matches, "input");
    let options = extract_options(config)?;
    let format = RecordFormat::from_name(&config.extract.format)?;

    if matches.get_flag("stdout") {
        let stdout = io::stdout();
        let stats = extract_to_writer(
            open_corpus(input)?,
            BufWriter::new(stdout.lock()),
            &options,
            format,
        )?;
        info!("{}: {} records", input.display(), stats.records_emitted);
    } else {
        let (output, stats) = extract_file(input, path_arg(matches, "out-dir"), &options, format)?;
        info!("Wrote {} records to {}", stats.records_emitted, output.display());
    }
    Ok(())
}

/// Handle the dict command
fn handle_dict_command(matches: &ArgMatches, config: &SumdataConfig) -> Result<()> {
    let options = DictOptions {
        min_count: *matches
            .get_one::<u64>("min-count")
            .expect("min-count is required"),
        pseudo_tokens: config.dict.pseudo_tokens.clone(),
        pseudo_count: config.dict.pseudo_count.clone(),
    };
    let mut builder = DictionaryBuilder::new();
    builder.add_reader(open_input(path_arg(matches, "input"))?)?;
    let (article, title) = builder.write_files(path_arg(matches, "prefix"), &options)?;
    info!("Wrote {} and {}", article.display(), title.display());
    Ok(())
}

/// Handle the filter command
fn handle_filter_command(matches: &ArgMatches, config: &SumdataConfig) -> Result<()> {
    let filter = QualityFilter::new(FilterOptions {
        bad_words: config.filter.bad_words.clone(),
        article_min: config.filter.article_min,
        article_max: config.filter.article_max,
        title_min: config.filter.title_min,
        title_max: config.filter.title_max,
        min_shared_words: config.filter.min_shared_words,
        shared_word_min_len: config.filter.shared_word_min_len,
    });
    let stdout = io::stdout();
    filter.filter_lines(
        open_input(path_arg(matches, "input"))?,
        BufWriter::new(stdout.lock()),
    )?;
    Ok(())
}

/// Handle the pull command
fn handle_pull_command(matches: &ArgMatches, config: &SumdataConfig) -> Result<()> {
    let mode_name = matches
        .get_one::<String>("mode")
        .expect("mode is required");
    let mode = ProjectionMode::from_name(mode_name)?;
    let vocab = Vocabulary::from_path(path_arg(matches, "dict"))?;
    let projector =
        Projector::with_punctuation(mode, vocab, config.project.title_punctuation.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let used = projector.project_lines(stdin.lock(), BufWriter::new(stdout.lock()))?;
    info!("Projected {} records as {}", used, mode_name);
    Ok(())
}

/// Handle the duc command
fn handle_duc_command(matches: &ArgMatches, config: &SumdataConfig) -> Result<()> {
    let paths = DucPaths {
        sum_docs: path_arg(matches, "sum-docs").to_path_buf(),
        result_docs: path_arg(matches, "result-docs").to_path_buf(),
        ref_dir: path_arg(matches, "ref-dir").to_path_buf(),
        sys_dir: path_arg(matches, "sys-dir").to_path_buf(),
        article_file: path_arg(matches, "article-file").to_path_buf(),
    };
    let options = DucOptions {
        year: matches
            .get_one::<String>("year")
            .expect("year has a default")
            .clone(),
        short_sentence_chars: config.duc.short_sentence_chars,
        prefix_chars: config.duc.prefix_chars,
        reference_count: config.duc.reference_count,
    };
    build_test_set(&paths, &options)?;
    Ok(())
}

/// Handle the rouge command
fn handle_rouge_command(matches: &ArgMatches) -> Result<()> {
    let paths = RougePaths {
        base: path_arg(matches, "base").to_path_buf(),
        gold: path_arg(matches, "gold").to_path_buf(),
        system: path_arg(matches, "system").to_path_buf(),
        input: path_arg(matches, "input").to_path_buf(),
    };
    rouge_layout(&paths)?;
    Ok(())
}

/// Handle the sweep command
fn handle_sweep_command(matches: &ArgMatches, config: &SumdataConfig) -> Result<()> {
    let src = matches
        .get_one::<String>("src")
        .expect("src is required");
    let model = matches
        .get_one::<String>("model")
        .expect("model is required");
    let params_path = matches
        .get_one::<PathBuf>("params")
        .unwrap_or(&config.sweep.params_file);

    let options = SweepOptions {
        title_len: config.sweep.title_len,
        command: config.sweep.command.clone(),
    };
    let params = sweep::read_params(params_path)?;
    let command = sweep::build_command(src, model, &params, &options)?;

    if matches.get_flag("dry-run") {
        println!("{}", command);
        return Ok(());
    }
    sweep::run(&command)
}
