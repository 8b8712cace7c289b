use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

pub fn span_line_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|span| UnicodeWidthStr::width(span.text.as_str()))
        .sum()
}

pub fn clip_text_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}

pub fn fit_spans_to_width(spans: SpanLine, width: usize) -> SpanLine {
    if width == 0 {
        return vec![];
    }

    let mut out = Vec::<Span>::new();
    let mut used = 0usize;
    for span in spans {
        if used >= width {
            break;
        }
        let available = width.saturating_sub(used);
        let clipped = clip_text_to_width(span.text.as_str(), available);
        if clipped.is_empty() {
            continue;
        }
        used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
        out.push(Span::styled(clipped, span.style));
    }

    if used < width {
        out.push(Span::new(" ".repeat(width - used)));
    }
    out
}

pub fn border_line(left: char, middle: char, right: char, widths: &[usize]) -> SpanLine {
    let border_style = Style::new().color(Color::DarkGrey);
    let mut line = Vec::<Span>::new();
    line.push(Span::styled(left.to_string(), border_style));
    for (idx, width) in widths.iter().enumerate() {
        line.push(Span::styled(
            "─".repeat(width.saturating_add(2)),
            border_style,
        ));
        if idx + 1 < widths.len() {
            line.push(Span::styled(middle.to_string(), border_style));
        }
    }
    line.push(Span::styled(right.to_string(), border_style));
    line
}

pub fn inner_width(widths: &[usize]) -> usize {
    widths.iter().map(|w| w + 2).sum::<usize>() + widths.len().saturating_sub(1)
}

pub fn grid_row(cells: Vec<SpanLine>, widths: &[usize]) -> SpanLine {
    let border_style = Style::new().color(Color::DarkGrey);
    let mut line = Vec::<Span>::new();
    for (idx, width) in widths.iter().enumerate() {
        line.push(Span::styled("│ ", border_style));
        line.extend(fit_spans_to_width(
            cells.get(idx).cloned().unwrap_or_default(),
            *width,
        ));
        line.push(Span::new(" "));
    }
    line.push(Span::styled("│", border_style));
    line
}

pub fn full_width_row(content: SpanLine, widths: &[usize]) -> SpanLine {
    let border_style = Style::new().color(Color::DarkGrey);
    let inner = inner_width(widths);
    let mut line = vec![Span::styled("│", border_style)];
    let used = span_line_width(content.as_slice());
    line.extend(fit_spans_to_width(content, used.min(inner)));
    if used < inner {
        line.push(Span::new(" ".repeat(inner - used)));
    }
    line.push(Span::styled("│", border_style));
    line
}

#[cfg(test)]
mod tests {
    use super::{clip_text_to_width, fit_spans_to_width, span_line_width};
    use crate::ui::span::Span;

    #[test]
    fn clip_respects_wide_chars() {
        assert_eq!(clip_text_to_width("日本語", 4), "日本");
        assert_eq!(clip_text_to_width("abc", 0), "");
    }

    #[test]
    fn fit_pads_to_exact_width() {
        let line = fit_spans_to_width(vec![Span::new("ab")], 5);
        assert_eq!(span_line_width(line.as_slice()), 5);
    }
}
