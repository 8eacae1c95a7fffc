use csvcore::{parse_reader, Config, ErrorKind, PerRowError, RowInfo, Value};

fn rows(input: &[u8], config: Config) -> Result<Vec<Vec<Option<String>>>, csvcore::ParserError> {
    let mut out = Vec::new();
    let mut collect = |cells: &[Value<'_>], _: RowInfo| -> Result<(), PerRowError> {
        out.push(
            cells
                .iter()
                .map(|c| c.as_bytes().map(|b| String::from_utf8(b.to_vec()).unwrap()))
                .collect(),
        );
        Ok(())
    };
    parse_reader(std::io::Cursor::new(input.to_vec()), config, &mut collect)?;
    Ok(out)
}

fn cell(s: &str) -> Option<String> {
    Some(s.to_string())
}

#[test]
fn basic() {
    let input = br#"cell 1,cell 2,cell 3,cell 4
"Hello, world!","Hi ""Quote""","""HELLO""","""name"""
"#;
    let parsed = rows(input, Config::default()).unwrap();
    assert_eq!(
        parsed,
        vec![
            vec![cell("cell 1"), cell("cell 2"), cell("cell 3"), cell("cell 4")],
            vec![
                cell("Hello, world!"),
                cell(r#"Hi "Quote""#),
                cell(r#""HELLO""#),
                cell(r#""name""#),
            ],
        ]
    );
}

#[test]
fn dequote_with_nested_quotes() {
    let parsed = rows(br#""Hi ""Quote"" yo""#, Config::default()).unwrap();
    assert_eq!(parsed, vec![vec![cell(r#"Hi "Quote" yo"#)]]);
}

#[test]
fn open_and_shut() {
    let parsed = rows(b"", Config::default()).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn one_row_with_crlf_terminator() {
    let config = Config::builder().delimiter(b'|').build();
    let parsed = rows(b"abc\r\n", config).unwrap();
    assert_eq!(parsed, vec![vec![cell("abc")]]);
}

#[test]
fn two_rows_last_without_trailing_newline() {
    let config = Config::builder().delimiter(b'|').build();
    let parsed = rows(b"abc|def|ghi\r\njkl|mno|pqr", config).unwrap();
    assert_eq!(
        parsed,
        vec![
            vec![cell("abc"), cell("def"), cell("ghi")],
            vec![cell("jkl"), cell("mno"), cell("pqr")],
        ]
    );
}

#[test]
fn bare_newline_is_one_empty_row() {
    let parsed = rows(b"\n", Config::default()).unwrap();
    assert_eq!(parsed, vec![vec![Some(String::new())]]);
}

#[test]
fn every_chunk_size_produces_the_same_rows() {
    let input = b"alpha,\"be,ta\"\ngamma,\"del\"\"ta\"\nepsilon,zeta\n";
    let whole = rows(input, Config::default()).unwrap();

    for chunk_size in 1..=input.len() {
        let mut out = Vec::new();
        let mut collect = |cells: &[Value<'_>], _: RowInfo| -> Result<(), PerRowError> {
            out.push(
                cells
                    .iter()
                    .map(|c| c.as_bytes().map(|b| String::from_utf8(b.to_vec()).unwrap()))
                    .collect::<Vec<_>>(),
            );
            Ok(())
        };
        let mut parser = csvcore::Parser::new(Config::default());
        let mut offset = 0usize;
        let mut feed = |dst: &mut [u8]| -> Result<usize, csvcore::FeedError> {
            let n = (input.len() - offset).min(dst.len()).min(chunk_size);
            dst[..n].copy_from_slice(&input[offset..offset + n]);
            offset += n;
            Ok(n)
        };
        parser.parse(&mut feed, &mut collect).unwrap();
        assert_eq!(out, whole, "mismatch at chunk_size={chunk_size}");
    }
}

#[test]
fn distinct_escape_byte_configuration() {
    let config = Config::builder().escape(b'\\').build();
    let parsed = rows(br#""a\"b",plain"#, config).unwrap();
    assert_eq!(parsed, vec![vec![cell(r#"a"b"#), cell("plain")]]);
}

#[test]
fn skip_header_drops_only_the_first_row() {
    let config = Config::builder().skip_header(true).build();
    let parsed = rows(b"name,age\nalice,30\nbob,25\n", config).unwrap();
    assert_eq!(
        parsed,
        vec![vec![cell("alice"), cell("30")], vec![cell("bob"), cell("25")]]
    );
}

#[test]
fn null_sentinel_applies_only_to_unquoted_cells() {
    let config = Config::builder().null_str(b"NULL".to_vec()).build();
    let parsed = rows(b"NULL,\"NULL\",x\n", config).unwrap();
    assert_eq!(parsed, vec![vec![None, cell("NULL"), cell("x")]]);
}

#[test]
fn unterminated_quote_is_a_typed_error() {
    let err = rows(b"a,\"unterminated", Config::default()).unwrap_err();
    assert_eq!(*err.kind(), ErrorKind::UnterminatedQuote);
    assert!(!err.to_string().is_empty());
}

#[test]
fn row_exceeding_max_buffer_size_errors() {
    let config = Config::builder().init_buf_size(16).max_buf_size(32).build();
    let huge = vec![b'x'; 1000];
    let err = rows(&huge, config).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::RowTooLarge { .. }));
}

#[test]
fn config_defaults_match_documented_table() {
    let config = Config::default();
    assert_eq!(config.quote, b'"');
    assert_eq!(config.escape, b'"');
    assert_eq!(config.delimiter, b',');
    assert_eq!(config.init_buf_size, 4096);
    assert_eq!(config.max_buf_size, 1 << 30);
    assert_eq!(config.null_str, None);
    assert!(config.unquote_values);
    assert!(!config.skip_header);
}
