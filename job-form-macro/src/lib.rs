//! Procedural macros for deriving `Form` and `Choice` implementations.
//!
//! This crate provides:
//! - `#[derive(Form)]` - `Form` trait implementation plus a type-specific
//!   builder with `suggest_*` methods
//! - `#[derive(Choice)]` - `Choice` trait implementation for unit enums

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, LitStr, Meta, Token, Type,
    parse_macro_input, punctuated::Punctuated,
};

/// Derive the `Form` trait for a struct with named fields.
///
/// # Attributes
///
/// ## On the struct
/// - `#[title("...")]` - Heading shown above the form
/// - `#[prelude("...")]` - Message shown before the fields
/// - `#[epilogue("...")]` - Text of the submit control
///
/// ## On fields
/// - `#[ask("...")]` - The prompt text (defaults to the field name in Title Case)
/// - `#[required]` / `#[required("msg")]` - Reject empty values
/// - `#[multiline]` - Show a textarea
/// - `#[min_len(n, "msg")]` - Minimum number of characters
/// - `#[contains("needle", "msg")]` - Text must contain a substring
/// - `#[validate(fn_name)]` - Custom validator function
/// - `#[select(a, b, ...)]` - Numeric options for integer fields
/// - `#[display("...")]` - Label pattern for select options, `{}` is the value
#[proc_macro_derive(
    Form,
    attributes(
        ask, required, multiline, min_len, contains, validate, select, display, title, prelude,
        epilogue
    )
)]
pub fn derive_form(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    implement_form(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derive the `Choice` trait for an enum with unit variants.
///
/// # Attributes
///
/// ## On variants
/// - `#[value("code")]` - Submitted code (defaults to the lower-cased variant name)
/// - `#[label("...")]` - Display label (defaults to the variant name)
#[proc_macro_derive(Choice, attributes(value, label))]
pub fn derive_choice(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    implement_choice(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn implement_form(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let builder_name = format_ident!("{}Builder", name);

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Form can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            input,
            "Form can only be derived for structs with named fields",
        ));
    };

    let type_attrs = TypeAttrs::extract(&input.attrs)?;

    let mut fields = Vec::new();
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let attrs = FieldAttrs::extract(&field.attrs)?;
        let shape = FieldShape::classify(&field.ty, &attrs)?;
        fields.push(ParsedField {
            ident,
            ty: field.ty.clone(),
            attrs,
            shape,
        });
    }

    let definition_fn = generate_definition_fn(&type_attrs, &fields);
    let from_values_fn = generate_from_values_fn(name, &fields);
    let validator_checks = generate_validator_checks(&fields);
    let builder_impl = generate_builder(name, &builder_name, &fields);

    Ok(quote! {
        #validator_checks

        impl job_form::Form for #name {
            fn definition() -> job_form::FormDefinition {
                #definition_fn
            }

            fn from_values(
                values: &job_form::FormValues,
            ) -> ::core::result::Result<Self, job_form::ValueError> {
                #from_values_fn
            }
        }

        impl #name {
            /// Returns a builder for running this form.
            pub fn builder() -> #builder_name {
                #builder_name::new()
            }
        }

        #builder_impl
    })
}

fn implement_choice(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Choice can only be derived for enums",
        ));
    };

    let mut variants = Vec::new();
    let mut from_index_arms = Vec::new();
    let mut index_arms = Vec::new();

    for (idx, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Choice variants cannot carry data",
            ));
        }

        let ident = &variant.ident;
        let attrs = VariantAttrs::extract(&variant.attrs)?;
        let code = attrs
            .value
            .unwrap_or_else(|| ident.to_string().to_lowercase());
        let label = attrs.label.unwrap_or_else(|| ident.to_string());

        variants.push(quote! { job_form::Variant::new(#code, #label) });
        from_index_arms.push(quote! { #idx => ::core::option::Option::Some(#name::#ident) });
        index_arms.push(quote! { #name::#ident => #idx });
    }

    Ok(quote! {
        impl job_form::Choice for #name {
            fn variants() -> ::std::vec::Vec<job_form::Variant> {
                vec![#(#variants),*]
            }

            fn from_index(index: usize) -> ::core::option::Option<Self> {
                match index {
                    #(#from_index_arms,)*
                    _ => ::core::option::Option::None,
                }
            }

            fn index(&self) -> usize {
                match self {
                    #(#index_arms,)*
                }
            }
        }
    })
}

// ============================================================================
// Attribute Extraction
// ============================================================================

/// Attributes that can appear on the struct itself
struct TypeAttrs {
    title: Option<String>,
    prelude: Option<String>,
    epilogue: Option<String>,
}

impl TypeAttrs {
    fn extract(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut title = None;
        let mut prelude = None;
        let mut epilogue = None;

        for attr in attrs {
            if attr.path().is_ident("title") {
                title = Some(extract_string_attr(attr)?);
            } else if attr.path().is_ident("prelude") {
                prelude = Some(extract_string_attr(attr)?);
            } else if attr.path().is_ident("epilogue") {
                epilogue = Some(extract_string_attr(attr)?);
            }
        }

        Ok(Self {
            title,
            prelude,
            epilogue,
        })
    }
}

/// A content rule, kept in declaration order
enum RuleAttr {
    MinLength { min: usize, message: String },
    Contains { needle: String, message: String },
    Custom(Ident),
}

/// Attributes that can appear on fields
struct FieldAttrs {
    ask: Option<String>,
    /// `Some(None)` for a bare `#[required]`
    required: Option<Option<String>>,
    multiline: bool,
    rules: Vec<RuleAttr>,
    select: Option<Vec<i64>>,
    display: Option<String>,
}

impl FieldAttrs {
    fn extract(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut ask = None;
        let mut required = None;
        let mut multiline = false;
        let mut rules = Vec::new();
        let mut select = None;
        let mut display = None;

        for attr in attrs {
            if attr.path().is_ident("ask") {
                ask = Some(extract_string_attr(attr)?);
            } else if attr.path().is_ident("required") {
                required = Some(match &attr.meta {
                    Meta::Path(_) => None,
                    _ => Some(extract_string_attr(attr)?),
                });
            } else if attr.path().is_ident("multiline") {
                multiline = true;
            } else if attr.path().is_ident("min_len") {
                let args = extract_args(attr)?;
                let [min, message] = args.as_slice() else {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "expected #[min_len(n, \"message\")]",
                    ));
                };
                rules.push(RuleAttr::MinLength {
                    min: expr_to_int(min)?.try_into().map_err(|_| {
                        syn::Error::new_spanned(min, "minimum length cannot be negative")
                    })?,
                    message: expr_to_string(message)?,
                });
            } else if attr.path().is_ident("contains") {
                let args = extract_args(attr)?;
                let [needle, message] = args.as_slice() else {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "expected #[contains(\"needle\", \"message\")]",
                    ));
                };
                rules.push(RuleAttr::Contains {
                    needle: expr_to_string(needle)?,
                    message: expr_to_string(message)?,
                });
            } else if attr.path().is_ident("validate") {
                rules.push(RuleAttr::Custom(extract_ident_attr(attr)?));
            } else if attr.path().is_ident("select") {
                let values = extract_args(attr)?
                    .iter()
                    .map(expr_to_int)
                    .collect::<syn::Result<Vec<_>>>()?;
                if values.is_empty() {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "#[select] needs at least one option",
                    ));
                }
                select = Some(values);
            } else if attr.path().is_ident("display") {
                display = Some(extract_string_attr(attr)?);
            }
        }

        Ok(Self {
            ask,
            required,
            multiline,
            rules,
            select,
            display,
        })
    }
}

/// Attributes that can appear on `Choice` variants
struct VariantAttrs {
    value: Option<String>,
    label: Option<String>,
}

impl VariantAttrs {
    fn extract(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut value = None;
        let mut label = None;

        for attr in attrs {
            if attr.path().is_ident("value") {
                value = Some(extract_string_attr(attr)?);
            } else if attr.path().is_ident("label") {
                label = Some(extract_string_attr(attr)?);
            }
        }

        Ok(Self { value, label })
    }
}

fn extract_string_attr(attr: &Attribute) -> syn::Result<String> {
    match &attr.meta {
        Meta::List(list) => {
            let lit: LitStr = list.parse_args()?;
            Ok(lit.value())
        }
        _ => Err(syn::Error::new_spanned(
            attr,
            "expected #[attr(\"string\")]",
        )),
    }
}

fn extract_ident_attr(attr: &Attribute) -> syn::Result<Ident> {
    match &attr.meta {
        Meta::List(list) => {
            // Accept both #[validate("fn_name")] and #[validate(fn_name)]
            if let Ok(lit) = list.parse_args::<LitStr>() {
                return Ok(Ident::new(&lit.value(), lit.span()));
            }
            list.parse_args()
        }
        _ => Err(syn::Error::new_spanned(
            attr,
            "expected #[attr(identifier)] or #[attr(\"string\")]",
        )),
    }
}

fn extract_args(attr: &Attribute) -> syn::Result<Vec<Expr>> {
    match &attr.meta {
        Meta::List(list) => {
            let args =
                list.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)?;
            Ok(args.into_iter().collect())
        }
        _ => Err(syn::Error::new_spanned(attr, "expected #[attr(...)]")),
    }
}

fn expr_to_string(expr: &Expr) -> syn::Result<String> {
    if let Expr::Lit(lit) = expr
        && let Lit::Str(s) = &lit.lit
    {
        return Ok(s.value());
    }
    Err(syn::Error::new_spanned(expr, "expected string literal"))
}

fn expr_to_int(expr: &Expr) -> syn::Result<i64> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int.base10_parse(),
            _ => Err(syn::Error::new_spanned(lit, "expected integer literal")),
        },
        Expr::Unary(unary) => {
            if matches!(unary.op, syn::UnOp::Neg(_))
                && let Expr::Lit(lit) = &*unary.expr
                && let Lit::Int(int) = &lit.lit
            {
                let val: i64 = int.base10_parse()?;
                return Ok(-val);
            }
            Err(syn::Error::new_spanned(expr, "expected integer literal"))
        }
        _ => Err(syn::Error::new_spanned(expr, "expected integer literal")),
    }
}

// ============================================================================
// Field Classification
// ============================================================================

struct ParsedField {
    ident: Ident,
    ty: Type,
    attrs: FieldAttrs,
    shape: FieldShape,
}

/// How a field's Rust type maps onto a form input.
enum FieldShape {
    Text { multiline: bool },
    Select,
    Choice,
}

impl FieldShape {
    fn classify(ty: &Type, attrs: &FieldAttrs) -> syn::Result<Self> {
        let type_name = type_to_string(ty);
        let is_int = matches!(
            type_name.as_str(),
            "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize"
        );

        if type_name == "String" {
            if attrs.select.is_some() {
                return Err(syn::Error::new_spanned(
                    ty,
                    "#[select] is only supported on integer fields",
                ));
            }
            return Ok(Self::Text {
                multiline: attrs.multiline,
            });
        }

        if attrs.multiline {
            return Err(syn::Error::new_spanned(
                ty,
                "#[multiline] is only supported on String fields",
            ));
        }

        if is_int {
            if attrs.select.is_none() {
                return Err(syn::Error::new_spanned(
                    ty,
                    "integer fields need #[select(...)] options",
                ));
            }
            return Ok(Self::Select);
        }

        if attrs.select.is_some() {
            return Err(syn::Error::new_spanned(
                ty,
                "#[select] is only supported on integer fields",
            ));
        }

        // Anything else must implement `Choice`
        Ok(Self::Choice)
    }
}

fn type_to_string(ty: &Type) -> String {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|s| s.ident.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn title_case(field_name: &str) -> String {
    field_name
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Definition Generation
// ============================================================================

fn option_tokens(value: &Option<String>) -> TokenStream2 {
    match value {
        Some(s) => quote! { ::core::option::Option::Some(#s.to_string()) },
        None => quote! { ::core::option::Option::None },
    }
}

fn generate_definition_fn(type_attrs: &TypeAttrs, fields: &[ParsedField]) -> TokenStream2 {
    let title = option_tokens(&type_attrs.title);
    let prelude = option_tokens(&type_attrs.prelude);
    let epilogue = option_tokens(&type_attrs.epilogue);

    let schemas: Vec<_> = fields.iter().map(generate_field_schema).collect();

    quote! {
        job_form::FormDefinition {
            title: #title,
            prelude: #prelude,
            fields: vec![#(#schemas),*],
            epilogue: #epilogue,
        }
    }
}

fn generate_field_schema(field: &ParsedField) -> TokenStream2 {
    let name_str = field.ident.to_string();
    let ask = field
        .attrs
        .ask
        .clone()
        .unwrap_or_else(|| title_case(&name_str));
    let ty = &field.ty;

    let kind = match &field.shape {
        FieldShape::Text { multiline: true } => quote! { job_form::FieldKind::Multiline },
        FieldShape::Text { multiline: false } => quote! { job_form::FieldKind::Input },
        FieldShape::Select => {
            let values = field.attrs.select.clone().unwrap_or_default();
            let pattern = field.attrs.display.clone().unwrap_or_else(|| "{}".to_string());
            quote! {
                job_form::FieldKind::Select(
                    job_form::SelectField::with_pattern(&[#(#values),*], #pattern)
                )
            }
        }
        FieldShape::Choice => quote! {
            job_form::FieldKind::OneOf(
                job_form::OneOfField::new(<#ty as job_form::Choice>::variants())
            )
        },
    };

    // The required check always comes first
    let mut rules = Vec::new();
    match &field.attrs.required {
        Some(Some(message)) => rules.push(quote! { job_form::Rule::required_with(#message) }),
        Some(None) => rules.push(quote! { job_form::Rule::required() }),
        None => {}
    }
    for rule in &field.attrs.rules {
        rules.push(match rule {
            RuleAttr::MinLength { min, message } => {
                quote! { job_form::Rule::min_length(#min, #message) }
            }
            RuleAttr::Contains { needle, message } => {
                quote! { job_form::Rule::contains(#needle, #message) }
            }
            RuleAttr::Custom(validator) => quote! { job_form::Rule::Custom(#validator) },
        });
    }

    quote! {
        job_form::FieldSchema::new(
            job_form::FieldPath::new(#name_str),
            #ask,
            #kind,
        )
        #(.with_rule(#rules))*
    }
}

// ============================================================================
// from_values Generation
// ============================================================================

fn generate_from_values_fn(name: &Ident, fields: &[ParsedField]) -> TokenStream2 {
    let inits: Vec<_> = fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let name_str = ident.to_string();
            let ty = &field.ty;
            let path_expr = quote! { job_form::FieldPath::new(#name_str) };

            let extraction = match &field.shape {
                // Untouched optional text reads back as empty
                FieldShape::Text { .. } => quote! {
                    match values.get_string(&#path_expr) {
                        ::core::result::Result::Ok(text) => text.to_string(),
                        ::core::result::Result::Err(job_form::ValueError::MissingPath(_)) => {
                            ::std::string::String::new()
                        }
                        ::core::result::Result::Err(err) => return ::core::result::Result::Err(err),
                    }
                },
                FieldShape::Select => quote! {
                    {
                        let path = #path_expr;
                        let raw = values.get_int(&path)?;
                        <#ty>::try_from(raw)
                            .map_err(|_| job_form::ValueError::OutOfRange { path, value: raw })?
                    }
                },
                FieldShape::Choice => quote! {
                    {
                        let path = #path_expr;
                        let index = values.get_chosen_variant(&path)?;
                        <#ty as job_form::Choice>::from_index(index)
                            .ok_or(job_form::ValueError::UnknownVariant { path, index })?
                    }
                },
            };

            quote! { #ident: #extraction }
        })
        .collect();

    quote! {
        ::core::result::Result::Ok(#name {
            #(#inits),*
        })
    }
}

fn generate_validator_checks(fields: &[ParsedField]) -> TokenStream2 {
    let checks = fields.iter().flat_map(|field| {
        field.attrs.rules.iter().filter_map(|rule| match rule {
            RuleAttr::Custom(validator) => Some(quote! {
                const _: job_form::Validator = #validator;
            }),
            _ => None,
        })
    });

    quote! { #(#checks)* }
}

// ============================================================================
// Builder Generation
// ============================================================================

fn generate_builder(name: &Ident, builder_name: &Ident, fields: &[ParsedField]) -> TokenStream2 {
    let suggest_methods: Vec<_> = fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let name_str = ident.to_string();
            let ty = &field.ty;
            let suggest_name = format_ident!("suggest_{}", ident);

            let (param_type, conversion) = match &field.shape {
                FieldShape::Text { .. } => (
                    quote! { impl Into<String> },
                    quote! { job_form::FieldValue::String(value.into()) },
                ),
                FieldShape::Select => (
                    quote! { #ty },
                    quote! { job_form::FieldValue::Int(value as i64) },
                ),
                FieldShape::Choice => (
                    quote! { #ty },
                    quote! {
                        job_form::FieldValue::ChosenVariant(job_form::Choice::index(&value))
                    },
                ),
            };

            quote! {
                /// Pre-fill this field (the user can modify it)
                pub fn #suggest_name(mut self, value: #param_type) -> Self {
                    self.suggestions.insert(#name_str.to_string(), #conversion);
                    self
                }
            }
        })
        .collect();

    quote! {
        /// Builder for running forms with suggested values
        pub struct #builder_name {
            suggestions: ::std::collections::HashMap<String, job_form::FieldValue>,
        }

        impl #builder_name {
            /// Create a new builder
            pub fn new() -> Self {
                Self {
                    suggestions: ::std::collections::HashMap::new(),
                }
            }

            #(#suggest_methods)*

            /// The form definition with suggestions applied
            pub fn definition(&self) -> job_form::FormDefinition {
                let mut definition = <#name as job_form::Form>::definition();
                for field in definition.fields_mut() {
                    if let ::core::option::Option::Some(value) =
                        self.suggestions.get(field.path().as_str())
                    {
                        field.set_suggestion(value.clone());
                    }
                }
                definition
            }

            /// A controller with every field at its initial value
            pub fn controller(&self) -> job_form::FormController {
                job_form::FormController::new(self.definition())
            }

            /// Run the form with the given backend.
            ///
            /// Returns the last accepted submission, or `None` if the user
            /// left without one.
            pub fn run<B: job_form::FormBackend>(
                self,
                backend: B,
            ) -> ::core::result::Result<::core::option::Option<#name>, job_form::anyhow::Error> {
                let mut controller = self.controller();
                if let ::core::result::Result::Err(err) = backend.drive(&mut controller) {
                    return ::core::result::Result::Err(err.into());
                }

                match controller.snapshot() {
                    ::core::option::Option::Some(snapshot) => ::core::result::Result::Ok(
                        ::core::option::Option::Some(snapshot.to_form::<#name>()?),
                    ),
                    ::core::option::Option::None => ::core::result::Result::Ok(
                        ::core::option::Option::None,
                    ),
                }
            }
        }

        impl Default for #builder_name {
            fn default() -> Self {
                Self::new()
            }
        }
    }
}
