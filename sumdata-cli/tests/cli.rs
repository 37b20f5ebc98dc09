use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const CORPUS: &str = "\
<DOC id=\"APW_ENG_19981016.0240\" type=\"story\">
<HEADLINE>
( (NP (NNS Storms) (VBP flood) (JJ coastal) (NNS towns)))
</HEADLINE>
<TEXT>
<P>
(S (NP (DT The) (NN storm)) (VP (VBD hit) (DT the) (NN coast) (IN on) (NNP Monday) (, ,) (VBG flooding) (CD 12) (NNS towns)) (. .))
</P>
</TEXT>
</DOC>
<DOC id=\"APW_ENG_19981016.0241\" type=\"advis\">
<HEADLINE>
(NP (NN UPDATE) (CD 2))
</HEADLINE>
<TEXT>
<P>
(S (NP (NN Update)) (. .))
</P>
</TEXT>
</DOC>
";

const RECORD: &str = "(NP (NNS Storms) (VBP flood) (JJ coastal) (NNS towns))\t\
(TOP (S (NP (DT The) (NN storm)) (VP (VBD hit) (DT the) (NN coast) (IN on) (NNP Monday) (, ,) (VBG flooding) (CD ##) (NNS towns)) (. .)))\t\
Storms flood coastal towns\t\
The storm hit the coast on Monday , flooding ## towns .";

fn write_corpus(root: &Path) -> PathBuf {
    let dir = root.join("apw_eng");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("apw_eng_199810.xml");
    fs::write(&path, CORPUS).unwrap();
    path
}

#[test]
fn extract_writes_record_file_under_parent_dir() {
    let root = tempfile::tempdir().unwrap();
    let input = write_corpus(root.path());
    let out = root.path().join("out");

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("extract").arg(&input).arg(&out);
    cmd.assert().success();

    let written = fs::read_to_string(out.join("apw_eng").join("apw_eng_199810.txt")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], RECORD);
}

#[test]
fn extract_to_stdout_as_json() {
    let root = tempfile::tempdir().unwrap();
    let input = write_corpus(root.path());

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("extract")
        .arg(&input)
        .arg("--stdout")
        .arg("--format")
        .arg("json");
    cmd.assert().success().stdout(
        predicate::str::contains("\"title_words\":[\"Storms\",\"flood\",\"coastal\",\"towns\"]")
            .and(predicate::str::contains("\"title_parse\":\"(NP (NN UPDATE) (CD #))\"")),
    );
}

#[test]
fn filter_keeps_only_good_records() {
    let root = tempfile::tempdir().unwrap();
    let records = root.path().join("records.txt");
    fs::write(
        &records,
        format!(
            "{}\n(NP (NN UPDATE) (CD #))\t(TOP (S (NP (NN Update)) (. .)))\tUPDATE #\tUpdate .\nbad line\n",
            RECORD
        ),
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("filter").arg(&records);
    cmd.assert().success().stdout(format!("{}\n", RECORD));
}

#[test]
fn dict_then_pull_maps_unknown_words() {
    let root = tempfile::tempdir().unwrap();
    let records = root.path().join("train.txt");
    fs::write(&records, format!("{}\n", RECORD)).unwrap();
    let prefix = root.path().join("train");

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("dict").arg(&records).arg(&prefix).arg("1");
    cmd.assert().success();

    let title_dict = fs::read_to_string(root.path().join("train.title.dict")).unwrap();
    assert_eq!(
        title_dict,
        "<unk> 100000.0\n<s> 100000.0\n</s> 100000.0\nstorms 1\nflood 1\ncoastal 1\ntowns 1\n"
    );
    let article_dict = root.path().join("train.article.dict");
    assert!(article_dict.exists());

    let input = "x\tx\tStorms hit towns !\tx\n";
    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("pull")
        .arg("trg_lc")
        .arg(root.path().join("train.title.dict"))
        .write_stdin(input);
    cmd.assert().success().stdout("storms <unk> towns\n");
}

#[test]
fn pull_rejects_unknown_mode() {
    let root = tempfile::tempdir().unwrap();
    let dict = root.path().join("empty.dict");
    fs::write(&dict, "").unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("pull").arg("tree").arg(&dict).write_stdin("");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown mode: tree"));
}

#[test]
fn missing_input_reports_path() {
    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("filter").arg("/nonexistent/records.txt");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("/nonexistent/records.txt"));
}

#[test]
fn sweep_dry_run_prints_command() {
    let root = tempfile::tempdir().unwrap();
    let params = root.path().join("blank.params");
    fs::write(&params, "LM 1.0\nuni 0\nbi 0\ntri 0\nlength 0\nooo 0\n").unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("sweep")
        .arg("input.txt")
        .arg("model.th7")
        .arg("--params")
        .arg(&params)
        .arg("--dry-run");
    cmd.assert().success().stdout(
        predicate::str::contains("-modelFilename model.th7 -inputf input.txt")
            .and(predicate::str::contains("-length 14"))
            .and(predicate::str::contains("-lmWeight 1.0")),
    );
}

#[test]
fn config_file_changes_sweep_title_length() {
    let root = tempfile::tempdir().unwrap();
    let params = root.path().join("blank.params");
    fs::write(&params, "LM 1.0\nuni 0\nbi 0\ntri 0\nlength 0\nooo 0\n").unwrap();
    let config = root.path().join("sumdata.toml");
    fs::write(&config, "[sweep]\ntitle_len = 9\n").unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("--config")
        .arg(&config)
        .arg("sweep")
        .arg("input.txt")
        .arg("model.th7")
        .arg("--params")
        .arg(&params)
        .arg("--dry-run");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("-length 9 "));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("sweep")
        .arg("a")
        .arg("b")
        .arg("--dry-run")
        .arg("--config")
        .arg("/nonexistent/sumdata.toml");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn local_config_file_is_picked_up() {
    let root = tempfile::tempdir().unwrap();
    let input = write_corpus(root.path());
    fs::write(root.path().join("sumdata.toml"), "[extract]\nformat = \"json\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.current_dir(root.path()).arg("extract").arg(&input).arg("--stdout");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("{\"title_parse\":"));

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.current_dir(root.path())
        .arg("extract")
        .arg(&input)
        .arg("--stdout")
        .arg("--format")
        .arg("tsv");
    cmd.assert().success().stdout(predicate::str::starts_with(RECORD));
}

#[test]
fn unknown_incomplete_mode_in_config_fails() {
    let root = tempfile::tempdir().unwrap();
    let input = write_corpus(root.path());
    let config = root.path().join("modes.toml");
    fs::write(&config, "[extract]\nincomplete = \"keep\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("extract")
        .arg(&input)
        .arg("--stdout")
        .arg("--config")
        .arg(&config);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown mode: keep"));
}

#[test]
fn flush_incomplete_keeps_trailing_document() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("cut.xml");
    fs::write(&input, "<HEADLINE>\n(NP (NN cut))\n</HEADLINE>\n<P>\n(S (NN body) (. .))\n").unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("extract").arg(&input).arg("--stdout");
    cmd.assert().success().stdout("");

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("extract").arg(&input).arg("--stdout").arg("--flush-incomplete");
    cmd.assert()
        .success()
        .stdout("(NP (NN cut))\t(TOP (S (NN body) (. .)))\tcut\tbody .\n");
}

const DUC_DOC: &str = "\
<DOC>
<DOCNO> APW19981016.0240 </DOCNO>
<TEXT>
<P>
Heavy rains flooded the city on Monday &amp; officials said.
</P>
<P>
Nobody was hurt.
</P>
</TEXT>
</DOC>
";

#[test]
fn duc_builds_aligned_test_set() {
    let root = tempfile::tempdir().unwrap();
    let docset = root.path().join("docs").join("d30001t");
    fs::create_dir_all(&docset).unwrap();
    fs::write(docset.join("APW19981016.0240"), DUC_DOC).unwrap();
    let results = root.path().join("results");
    fs::create_dir_all(&results).unwrap();
    for (i, judge) in ["A", "B", "C", "D"].iter().enumerate() {
        fs::write(
            results.join(format!("D30001.P.10.T.{}.APW19981016.0240", judge)),
            format!("rains flood city {}\n", i),
        )
        .unwrap();
    }
    let refs = root.path().join("refs");
    let sys = root.path().join("sys");
    fs::create_dir_all(&refs).unwrap();
    fs::create_dir_all(&sys).unwrap();
    let article = root.path().join("input.txt");

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("duc")
        .arg("--sum-docs")
        .arg(root.path().join("docs"))
        .arg("--result-docs")
        .arg(&results)
        .arg("--ref-dir")
        .arg(&refs)
        .arg("--sys-dir")
        .arg(&sys)
        .arg("--article-file")
        .arg(&article);
    cmd.assert().success();

    let lead = "heavy rains flooded the city on monday officials said , nobody was hurt .";
    assert_eq!(fs::read_to_string(&article).unwrap(), format!("{}\n", lead));
    assert_eq!(
        fs::read_to_string(sys.join("task1_prefix.txt")).unwrap(),
        format!("{}\n", &lead[..lead.len().min(75)])
    );
    for i in 0..4 {
        assert_eq!(
            fs::read_to_string(refs.join(format!("task1_ref{}.txt", i))).unwrap(),
            format!("rains flood city {}\n", i)
        );
    }
}

#[test]
fn duc_fails_without_four_references() {
    let root = tempfile::tempdir().unwrap();
    let docset = root.path().join("docs").join("d30001t");
    fs::create_dir_all(&docset).unwrap();
    fs::write(docset.join("APW19981016.0240"), DUC_DOC).unwrap();
    let results = root.path().join("results");
    fs::create_dir_all(&results).unwrap();
    fs::write(results.join("D30001.P.10.T.A.APW19981016.0240"), "only one\n").unwrap();

    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("duc")
        .arg("--sum-docs")
        .arg(root.path().join("docs"))
        .arg("--result-docs")
        .arg(&results)
        .arg("--ref-dir")
        .arg(root.path())
        .arg("--sys-dir")
        .arg(root.path())
        .arg("--article-file")
        .arg(root.path().join("input.txt"));
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected 4 references"));
}

#[test]
fn rouge_lays_out_gold_and_system_files() {
    let root = tempfile::tempdir().unwrap();
    let base = root.path().join("base");
    fs::create_dir_all(base.join("references")).unwrap();
    fs::create_dir_all(base.join("system")).unwrap();
    fs::write(base.join("references").join("task1_ref0.txt"), "storms flood towns\n").unwrap();
    fs::write(base.join("system").join("task1_abs.txt"), "storm hits ## towns\n").unwrap();
    let input = root.path().join("input.txt");
    fs::write(&input, "the storm hit 12 towns .\n").unwrap();

    let gold = root.path().join("gold");
    let system = root.path().join("system");
    let mut cmd = cargo_bin_cmd!("sumdata");
    cmd.arg("rouge")
        .arg("--base")
        .arg(&base)
        .arg("--gold")
        .arg(&gold)
        .arg("--system")
        .arg(&system)
        .arg("--input")
        .arg(&input);
    cmd.assert().success();

    let summary =
        fs::read_to_string(system.join("abs").join("task10000.abs.system")).unwrap();
    assert_eq!(summary, "storm hits 12 towns\n");
    assert!(gold.join("task10000").join("task10000.0000.gold").exists());
}
