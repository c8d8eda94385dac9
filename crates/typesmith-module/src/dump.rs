//! Human-readable module listing.

use std::fmt::Write as _;

use typesmith_core::Colors;

use crate::{MemberInfo, Module, TypeInfo};

/// Render a module as text, one type per block.
///
/// Entries that fail to decode are listed with their error instead of
/// aborting the dump.
pub fn dump(module: &Module, colors: Colors) -> String {
    let c = colors;
    let mut out = String::new();
    let types = module.types();
    let strings = module.strings();

    writeln!(
        out,
        "{}module{} {}{}{} v{}",
        c.dim,
        c.reset,
        c.blue,
        module.name(),
        c.reset,
        module.version()
    )
    .unwrap();
    writeln!(
        out,
        "{}{} types, {} members, {} strings{}",
        c.dim,
        types.len(),
        types.members_count(),
        strings.len(),
        c.reset
    )
    .unwrap();

    for idx in 0..types.len() {
        match types.decode(idx, &strings) {
            Ok(info) => dump_type(&mut out, &info, c),
            Err(failure) => writeln!(out, "  ! {failure}").unwrap(),
        }
    }
    out
}

fn dump_type(out: &mut String, info: &TypeInfo, c: Colors) {
    let visibility = if info.public { "" } else { "private " };
    write!(
        out,
        "  {}{}{}{} {}{}{}",
        c.dim,
        visibility,
        info.kind.as_str(),
        c.reset,
        c.blue,
        info.full_name(),
        c.reset
    )
    .unwrap();
    if let Some(base) = &info.base {
        write!(out, " : {base}").unwrap();
    }
    out.push('\n');

    for member in &info.members {
        writeln!(out, "    {}", member_line(member)).unwrap();
    }
}

fn member_line(member: &MemberInfo) -> String {
    match &member.type_name {
        None => format!("{} = {}", member.name, member.value),
        Some(type_name) => {
            let list = if member.list { "[]" } else { "" };
            let optional = if member.optional { "?" } else { "" };
            format!("{}: {}{}{}", member.name, type_name, list, optional)
        }
    }
}
