extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{self, DeriveInput, Type};

#[derive(deluxe::ExtractAttributes, Debug)]
#[deluxe(attributes(metadata))]
struct MetaDataDefinition {
    #[deluxe(default = String::from(""))]
    name: String,

    #[deluxe(default = String::from(""))]
    description: String,
}

#[derive(deluxe::ExtractAttributes, Debug)]
#[deluxe(attributes(arg))]
struct ArgDefinition {
    #[deluxe(default = String::from(""))]
    short: String,

    #[deluxe(default = String::from(""))]
    long: String,

    #[deluxe(default = String::from(""))]
    description: String,

    #[deluxe(default = false)]
    required: bool,

    #[deluxe(default = false)]
    positional: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum FieldKind {
    /// `bool`, set when the option is present
    Flag,
    /// `Option<T>`, left as `None` when absent
    Optional,
    /// Any other `T: FromStr`
    Value,
}

struct ArgData {
    field: syn::Ident,
    short: Option<String>,
    long: Option<String>,
    description: String,
    required: bool,
    positional: bool,
    kind: FieldKind,
}

impl ArgData {
    fn from_arg_attribs(field: syn::Ident, attrs: ArgDefinition, kind: FieldKind) -> deluxe::Result<ArgData> {
        let non_empty = |value: String| if value.is_empty() { None } else { Some(value) };
        let data = ArgData {
            field,
            short: non_empty(attrs.short),
            long: non_empty(attrs.long),
            description: attrs.description,
            required: attrs.required,
            positional: attrs.positional,
            kind,
        };

        if data.positional && data.kind == FieldKind::Flag {
            return Err(syn::Error::new_spanned(&data.field, "a positional argument cannot be a bool flag").into());
        }
        if !data.positional && data.short.is_none() && data.long.is_none() {
            return Err(syn::Error::new_spanned(&data.field, "an option needs a `short` or a `long` spelling").into());
        }
        Ok(data)
    }

    fn display_name(&self) -> String {
        if self.positional {
            return self.field.to_string().to_uppercase();
        }
        self.long.clone().or_else(|| self.short.clone()).unwrap_or_default()
    }
}

fn field_kind(field: &Type) -> deluxe::Result<FieldKind> {
    if let Type::Path(type_path) = field {
        if let Some(segment) = type_path.path.segments.last() {
            return Ok(match segment.ident.to_string().as_str() {
                "bool" => FieldKind::Flag,
                "Option" => FieldKind::Optional,
                _ => FieldKind::Value,
            });
        }
    }
    Err(syn::Error::new_spanned(field, "unsupported argument type").into())
}

fn extract_arg_field_attrs(ast: &mut DeriveInput) -> deluxe::Result<Vec<ArgData>> {
    let mut fields = Vec::new();

    if let syn::Data::Struct(s) = &mut ast.data {
        for field in s.fields.iter_mut() {
            let ident = match &field.ident {
                Some(ident) => ident.clone(),
                None => return Err(syn::Error::new_spanned(&field.ty, "tuple struct fields are not supported").into()),
            };
            let attrs: ArgDefinition = deluxe::extract_attributes(field)?;
            let kind = field_kind(&field.ty)?;
            fields.push(ArgData::from_arg_attribs(ident, attrs, kind)?);
        }
    } else {
        return Err(syn::Error::new_spanned(&ast.ident, "CmdArgs can only be derived for structs").into());
    }

    Ok(fields)
}

fn build_usage(exec_name: &str, description: &str, fields: &[ArgData]) -> String {
    let mut usage_str = format!("Usage: {} [OPTIONS]", exec_name);
    for arg in fields.iter().filter(|arg| arg.positional) {
        if arg.required {
            usage_str += &format!(" <{}>", arg.display_name());
        } else {
            usage_str += &format!(" [{}]", arg.display_name());
        }
    }

    if !description.is_empty() {
        usage_str += &format!("\n\n{}", description);
    }

    usage_str += "\n\nOptions:\n";
    for arg in fields.iter().filter(|arg| !arg.positional) {
        let parameter = match arg.kind {
            FieldKind::Flag => String::new(),
            _ => format!("<{}>", arg.field.to_string().to_uppercase()),
        };
        usage_str += &format!(
            "   {:4} {:16} {:10} {}",
            arg.short.as_deref().unwrap_or(""),
            arg.long.as_deref().unwrap_or(""),
            parameter,
            arg.description
        );
        if arg.required {
            usage_str += " (Required)";
        }
        usage_str += "\n";
    }
    usage_str += &format!("   {:4} {:16} {:10} {}", "-h", "--help", "", "Displays help");

    usage_str
}

/// Statement storing the `String` bound to `value` into the argument's field.
fn build_assignment(arg: &ArgData) -> TokenStream2 {
    let field = &arg.field;
    let name = arg.display_name();
    match arg.kind {
        FieldKind::Flag => quote! {
            parsed.#field = true;
        },
        FieldKind::Optional => quote! {
            parsed.#field = Some(
                value.parse().map_err(|_| format!("invalid value '{}' for '{}'", value, #name))?
            );
        },
        FieldKind::Value => quote! {
            parsed.#field = value.parse().map_err(|_| format!("invalid value '{}' for '{}'", value, #name))?;
        },
    }
}

fn build_option_arm(index: usize, arg: &ArgData) -> TokenStream2 {
    let patterns: Vec<&String> = arg.short.iter().chain(arg.long.iter()).collect();
    let name = arg.display_name();
    let take_value = match arg.kind {
        FieldKind::Flag => quote! {},
        _ => quote! {
            let value = match args.next() {
                Some(value) if !value.starts_with('-') => value,
                _ => return Err(format!("'{}' requires an argument", arg)),
            };
        },
    };
    let assignment = build_assignment(arg);

    quote! {
        #(#patterns)|* => {
            if processed[#index] {
                return Err(format!("option '{}' has already been given", #name));
            }
            processed[#index] = true;

            #take_value
            #assignment
        }
    }
}

fn build_positional_arm(position: usize, index: usize, arg: &ArgData) -> TokenStream2 {
    let assignment = build_assignment(arg);
    quote! {
        #position => {
            processed[#index] = true;
            #assignment
        }
    }
}

fn parse_cmd_args_derive2(item: TokenStream2) -> deluxe::Result<TokenStream2> {
    // parse
    let mut ast: DeriveInput = syn::parse2(item)?;
    let meta_data: MetaDataDefinition = deluxe::extract_attributes(&mut ast)?;

    // extract field attributes
    let fields = extract_arg_field_attrs(&mut ast)?;

    let ident = &ast.ident;
    let exec_name = if meta_data.name.is_empty() {
        ident.to_string().to_lowercase()
    } else {
        meta_data.name.clone()
    };
    let usage_str = build_usage(&exec_name, &meta_data.description, &fields);
    let options_count = fields.len();

    let option_arms = fields
        .iter()
        .enumerate()
        .filter(|(_, arg)| !arg.positional)
        .map(|(index, arg)| build_option_arm(index, arg));

    let positional_arms: Vec<TokenStream2> = fields
        .iter()
        .enumerate()
        .filter(|(_, arg)| arg.positional)
        .enumerate()
        .map(|(position, (index, arg))| build_positional_arm(position, index, arg))
        .collect();

    let required_checks = fields
        .iter()
        .enumerate()
        .filter(|(_, arg)| arg.required)
        .map(|(index, arg)| {
            let name = arg.display_name();
            quote! {
                if !processed[#index] {
                    return Err(format!("missing required argument '{}'", #name));
                }
            }
        });

    // Without positional fields every bare word is rejected
    let (positional_counter, bare_word_arm) = if positional_arms.is_empty() {
        (
            quote! {},
            quote! {
                _ => return Err(format!("unexpected argument '{}'", arg)),
            },
        )
    } else {
        (
            quote! {
                let mut positional = 0usize;
            },
            quote! {
                _ => {
                    let value = arg.clone();
                    match positional {
                        #(#positional_arms)*
                        _ => return Err(format!("unexpected argument '{}'", value)),
                    }
                    positional += 1;
                }
            },
        )
    };

    let (impl_generics, type_generics, where_clause) = ast.generics.split_for_impl();

    let code = quote! {
        impl #impl_generics #ident #type_generics #where_clause {
            pub fn usage() -> &'static str {
                #usage_str
            }

            /// Parses `args` (without the executable name). `Ok(None)` means
            /// help was requested.
            pub fn try_parse_from<I: IntoIterator<Item = String>>(args: I) -> Result<Option<Self>, String> {
                let mut parsed: Self = Default::default();
                let mut processed = [false; #options_count];
                #positional_counter

                let mut args = args.into_iter();
                while let Some(arg) = args.next() {
                    match arg.as_str() {
                        "-h" | "--help" => return Ok(None),
                        #(#option_arms)*
                        _ if arg.starts_with('-') && arg.len() > 1 => {
                            return Err(format!("'{}' is not a valid option", arg));
                        }
                        #bare_word_arm
                    }
                }

                #(#required_checks)*

                Ok(Some(parsed))
            }

            /// Parses the process arguments, printing usage and exiting on
            /// `--help` or misuse.
            pub fn parse() -> Self {
                match Self::try_parse_from(std::env::args().skip(1)) {
                    Ok(Some(parsed)) => parsed,
                    Ok(None) => {
                        println!("{}", Self::usage());
                        std::process::exit(0);
                    }
                    Err(msg) => {
                        eprintln!("[ERROR] {}", msg);
                        eprintln!("{}", Self::usage());
                        std::process::exit(64);
                    }
                }
            }
        }
    };

    Ok(code)
}

#[proc_macro_derive(CmdArgs, attributes(metadata, arg))]
pub fn parse_cmd_args_derive(input: TokenStream) -> TokenStream {
    match parse_cmd_args_derive2(input.into()) {
        Ok(code) => code.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
