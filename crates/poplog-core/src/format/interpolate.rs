//! Positional placeholder substitution (`%s` and friends)

/// Expand placeholders in `template` against `args`, in order.
///
/// `%s %d %i %f %j %o %O` each consume one argument and `%%` renders a single
/// `%`. A placeholder with no argument left stays literal; surplus arguments
/// are dropped. A template without any placeholder is returned untouched.
pub fn interpolate(template: &str, args: &[String]) -> String {
    if !has_placeholders(template) {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec) if is_conversion(spec) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

/// Number of argument-consuming placeholders in `template`.
pub fn placeholder_count(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
            }
            Some(spec) if is_conversion(spec) => {
                chars.next();
                count += 1;
            }
            _ => {}
        }
    }
    count
}

fn has_placeholders(template: &str) -> bool {
    placeholder_count(template) > 0
}

fn is_conversion(c: char) -> bool {
    matches!(c, 's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O')
}
