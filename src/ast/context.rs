//! Semantic context: record declarations and fully qualified type spelling.

use rustc_hash::FxHashMap;

use super::ty::{QualType, Qualifiers, RecordDecl, TemplateArg, TyKind};

/// Index of a record declaration inside an [`AstContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(u32);

/// Holds the record declarations the traversal has registered and spells
/// fully qualified type names.
///
/// The context is read-only while resolution runs; the traversal populates
/// it up front and passes it by shared reference. Spelling follows the
/// C++ declarator reading order: `const Foo &`, `int *`,
/// `std::vector<int>`.
#[derive(Debug, Default)]
pub struct AstContext {
    records: Vec<RecordDecl>,
    by_name: FxHashMap<String, RecordId>,
}

impl AstContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record declaration and return its id.
    ///
    /// Later registrations under the same qualified name win the by-name
    /// lookup; existing ids stay valid.
    pub fn add_record(&mut self, decl: RecordDecl) -> RecordId {
        let id = RecordId(self.records.len() as u32);
        self.by_name.insert(decl.name.to_string(), id);
        self.records.push(decl);
        id
    }

    pub fn record(&self, id: RecordId) -> &RecordDecl {
        &self.records[id.0 as usize]
    }

    /// Look a record up by its qualified name (without template arguments).
    pub fn lookup_record(&self, qualified: &str) -> Option<RecordId> {
        self.by_name.get(qualified).copied()
    }

    /// Fully qualified, qualifier-and-indirection-inclusive spelling of a
    /// type, e.g. `const std::__cxx11::basic_string<char> &`.
    pub fn fully_qualified_name(&self, qt: &QualType) -> String {
        let mut out = String::new();
        self.write_type(&mut out, qt);
        out
    }

    /// Spelling of a record including instantiation arguments, e.g.
    /// `std::vector<int>`.
    pub fn record_full_name(&self, record: &RecordDecl) -> String {
        let mut out = String::new();
        self.write_record(&mut out, record);
        out
    }

    fn write_type(&self, out: &mut String, qt: &QualType) {
        match &*qt.kind {
            TyKind::Pointer(pointee) => {
                self.write_type(out, pointee);
                if out.is_empty() || out.ends_with('*') {
                    out.push('*');
                } else {
                    out.push_str(" *");
                }
                if !qt.quals.is_empty() {
                    out.push_str(&qual_spelling(qt.quals));
                }
            }
            TyKind::LValueReference(pointee) => {
                self.write_type(out, pointee);
                if !out.is_empty() && !out.ends_with('*') {
                    out.push(' ');
                }
                out.push('&');
            }
            TyKind::RValueReference(pointee) => {
                self.write_type(out, pointee);
                if !out.is_empty() && !out.ends_with('*') {
                    out.push(' ');
                }
                out.push_str("&&");
            }
            TyKind::Builtin(kind) => {
                if !qt.quals.is_empty() {
                    out.push_str(&qual_spelling(qt.quals));
                    out.push(' ');
                }
                out.push_str(kind.spelling());
            }
            TyKind::Record(id) => {
                if !qt.quals.is_empty() {
                    out.push_str(&qual_spelling(qt.quals));
                    out.push(' ');
                }
                self.write_record(out, self.record(*id));
            }
            // No qualified name available; spell as nothing.
            TyKind::Unknown => {}
        }
    }

    fn write_record(&self, out: &mut String, record: &RecordDecl) {
        out.push_str(&record.name.to_string());
        if let Some(spec) = &record.specialization {
            out.push('<');
            for (i, arg) in spec.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write_template_arg(out, arg);
            }
            out.push('>');
        }
    }

    fn write_template_arg(&self, out: &mut String, arg: &TemplateArg) {
        match arg {
            TemplateArg::Type(qt) => self.write_type(out, qt),
            TemplateArg::Integral(v) => out.push_str(&v.to_string()),
            TemplateArg::Template(name) => out.push_str(&name.to_string()),
            TemplateArg::Pack(args) => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_template_arg(out, arg);
                }
            }
        }
    }
}

fn qual_spelling(quals: Qualifiers) -> String {
    let mut words = Vec::new();
    if quals.contains(Qualifiers::CONST) {
        words.push("const");
    }
    if quals.contains(Qualifiers::VOLATILE) {
        words.push("volatile");
    }
    words.join(" ")
}
