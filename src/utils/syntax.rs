use crate::ui::theme::Theme;
use ratatui::style::Color as TuiColor;
use ratatui::text::{Line, Span};
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, OnceLock};
use tracing::warn;

/// A highlighter turns a code block into styled lines. Returning `None`
/// means it could not handle the input; the caller then renders plain code.
pub type HighlightFn = fn(language: &str, code: &str, theme: &Theme) -> Option<Vec<Line<'static>>>;

/// Lines produced for one code block, and whether a highlighter (rather
/// than the plain fallback) produced them.
pub struct HighlightedCode {
    pub lines: Vec<Line<'static>>,
    pub highlighted: bool,
}

/// Lookup table from canonical language name to highlighter, with an
/// explicit fallback used for unknown tags and failed highlights.
#[derive(Clone)]
pub struct HighlighterTable {
    entries: HashMap<String, HighlightFn>,
    fallback: HighlightFn,
}

const SYNTECT_LANGUAGES: &[&str] = &[
    "python",
    "bash",
    "javascript",
    "json",
    "yaml",
    "rust",
    "go",
    "c",
    "cpp",
    "java",
    "html",
    "css",
    "sql",
];

impl HighlighterTable {
    /// A table with no entries; every block renders through the fallback.
    pub fn plain() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: plain_code_block,
        }
    }

    pub fn register(&mut self, language: &str, highlighter: HighlightFn) {
        self.entries
            .insert(normalize_lang_hint(language), highlighter);
    }

    pub fn with_fallback(mut self, fallback: HighlightFn) -> Self {
        self.fallback = fallback;
        self
    }

    /// Highlighter registered for `language`, after alias normalization.
    pub fn lookup(&self, language: &str) -> Option<HighlightFn> {
        self.entries.get(&normalize_lang_hint(language)).copied()
    }

    pub fn is_recognized(&self, language: &str) -> bool {
        self.lookup(language).is_some()
    }

    pub fn highlight(&self, language: Option<&str>, code: &str, theme: &Theme) -> HighlightedCode {
        if let Some((lang, highlighter)) =
            language.and_then(|lang| self.lookup(lang).map(|h| (lang, h)))
        {
            if let Some(lines) = highlighter(&normalize_lang_hint(lang), code, theme) {
                return HighlightedCode {
                    lines,
                    highlighted: true,
                };
            }
            warn!(language = lang, "highlighter failed, rendering plain code");
        }
        let lines = (self.fallback)(language.unwrap_or(""), code, theme)
            .unwrap_or_else(|| plain_lines(code, theme));
        HighlightedCode {
            lines,
            highlighted: false,
        }
    }
}

impl Default for HighlighterTable {
    fn default() -> Self {
        let mut table = Self::plain();
        for lang in SYNTECT_LANGUAGES {
            table.register(lang, highlight_code_block);
        }
        table
    }
}

impl std::fmt::Debug for HighlighterTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut languages: Vec<_> = self.entries.keys().collect();
        languages.sort();
        f.debug_struct("HighlighterTable")
            .field("languages", &languages)
            .finish()
    }
}

/// The fallback entry: code in the code block style, no colouring.
pub fn plain_code_block(_language: &str, code: &str, theme: &Theme) -> Option<Vec<Line<'static>>> {
    Some(plain_lines(code, theme))
}

fn plain_lines(code: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut style = theme.md_codeblock_text_style();
    if let Some(bg) = theme.md_codeblock_bg_color() {
        style = style.bg(bg);
    }
    code.split('\n')
        .map(|line| Line::from(vec![Span::styled(detab(line), style)]))
        .collect()
}

fn detab(s: &str) -> String {
    s.replace('\t', "    ")
}

// Simple FIFO cache (bounded) for highlighted blocks
// key = (lang_norm, hash)

fn hash_code(lang: &str, code: &str, theme_sig: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    lang.hash(&mut hasher);
    code.hash(&mut hasher);
    theme_sig.hash(&mut hasher);
    hasher.finish()
}

struct SimpleCache {
    map: HashMap<(String, u64), Vec<Line<'static>>>,
    order: VecDeque<(String, u64)>,
    cap: usize,
}

impl SimpleCache {
    fn new(cap: usize) -> Self {
        Self {
            map: HashMap::new(),
            order: VecDeque::new(),
            cap,
        }
    }

    fn get(&self, k: &(String, u64)) -> Option<Vec<Line<'static>>> {
        self.map.get(k).cloned()
    }

    fn put(&mut self, k: (String, u64), v: Vec<Line<'static>>) {
        if !self.map.contains_key(&k) {
            self.order.push_back(k.clone());
        }
        self.map.insert(k, v);
        while self.map.len() > self.cap {
            match self.order.pop_front() {
                Some(old) => {
                    self.map.remove(&old);
                }
                None => break,
            }
        }
    }
}

const CACHE_CAPACITY: usize = 64;

static SYNTAX_CACHE: Mutex<Option<SimpleCache>> = Mutex::new(None);

fn cache() -> MutexGuard<'static, Option<SimpleCache>> {
    // Entries are immutable values; a poisoned lock still holds a usable map.
    let mut guard = SYNTAX_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.is_none() {
        *guard = Some(SimpleCache::new(CACHE_CAPACITY));
    }
    guard
}

fn is_dark_background(c: &TuiColor) -> bool {
    match c {
        TuiColor::Rgb(r, g, b) => {
            let br = 0.2126 * (*r as f32) + 0.7152 * (*g as f32) + 0.0722 * (*b as f32);
            br < 128.0
        }
        TuiColor::White => false,
        _ => true,
    }
}

/// Fold common aliases onto one canonical name. Also accepts the
/// `language-<name>` class form.
pub fn normalize_lang_hint(s: &str) -> String {
    let t = s.trim().to_ascii_lowercase();
    let t = t.strip_prefix("language-").unwrap_or(&t);
    match t {
        "py" | "python" => "python".into(),
        "bash" | "sh" | "zsh" | "shell" => "bash".into(),
        "js" | "javascript" | "jsx" => "javascript".into(),
        "ts" | "tsx" | "typescript" => "typescript".into(),
        "yaml" | "yml" => "yaml".into(),
        "rust" | "rs" => "rust".into(),
        "c" | "h" => "c".into(),
        "cpp" | "cc" | "cxx" | "hpp" | "hxx" => "cpp".into(),
        "kotlin" | "kt" => "kotlin".into(),
        other => other.into(),
    }
}

fn parse_tui_color_from_syntect(c: syntect::highlighting::Color) -> TuiColor {
    TuiColor::Rgb(c.r, c.g, c.b)
}

pub(crate) fn pick_syntect_theme_name_for_theme(theme: &Theme) -> &'static str {
    if is_dark_background(&theme.background_color) {
        "base16-ocean.dark"
    } else {
        "InspiredGitHub"
    }
}

pub(crate) fn build_theme_signature(theme: &Theme, chosen_syntect: &str) -> String {
    format!(
        "{}|{:?}|{:?}",
        chosen_syntect,
        theme.md_codeblock_bg_color(),
        theme.background_color
    )
}

fn syntax_set() -> &'static syntect::parsing::SyntaxSet {
    static SYNTAX_SET: OnceLock<syntect::parsing::SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(syntect::parsing::SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static syntect::highlighting::ThemeSet {
    static THEME_SET: OnceLock<syntect::highlighting::ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(syntect::highlighting::ThemeSet::load_defaults)
}

/// Highlight with syntect. Returns `None` when syntect has no grammar for
/// the language, so the table falls back to plain code.
pub fn highlight_code_block(
    lang_hint: &str,
    code: &str,
    theme: &Theme,
) -> Option<Vec<Line<'static>>> {
    let lang_norm = normalize_lang_hint(lang_hint);
    let ps = syntax_set();
    let ts = theme_set();

    let theme_name = pick_syntect_theme_name_for_theme(theme);
    let syn_theme = ts
        .themes
        .get(theme_name)
        .or_else(|| ts.themes.get("base16-ocean.dark"))?;

    let theme_sig = build_theme_signature(theme, theme_name);
    let key = (lang_norm.clone(), hash_code(&lang_norm, code, &theme_sig));
    if let Some(lines) = cache().as_ref().and_then(|c| c.get(&key)) {
        return Some(lines);
    }

    let syntax = ps.find_syntax_by_token(&lang_norm)?;
    let mut h = syntect::easy::HighlightLines::new(syntax, syn_theme);
    let bg = theme.md_codeblock_bg_color();

    let mut out: Vec<Line<'static>> = Vec::new();
    for line in code.split('\n') {
        // syntect's newline grammars expect the terminator on every line
        let with_newline = format!("{line}\n");
        let ranges = h.highlight_line(&with_newline, ps).ok()?;
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (style, text) in ranges {
            let frag = text.strip_suffix('\n').unwrap_or(text);
            if frag.is_empty() {
                continue;
            }
            let mut st =
                ratatui::style::Style::default().fg(parse_tui_color_from_syntect(style.foreground));
            if let Some(bgcol) = bg {
                st = st.bg(bgcol);
            }
            spans.push(Span::styled(detab(frag), st));
        }
        if spans.is_empty() {
            // Keep one span so blank code lines still carry block metadata
            spans.push(Span::raw(""));
        }
        out.push(Line::from(spans));
    }

    if let Some(c) = cache().as_mut() {
        c.put(key, out.clone());
    }
    Some(out)
}
