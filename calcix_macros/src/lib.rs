use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, ReturnType, Type};

fn formatted_arg_error_msg(arg_name: &str, arg_pos: usize, fn_name: &str) -> String {
    format!(
        "Expected argument {} ('{}') to be f64, for {}",
        arg_pos, arg_name, fn_name
    )
}

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or(false, |segment| segment.ident == "f64"),
        _ => false,
    }
}

/// Turns `fn name(a: f64, ...) -> f64` into a registrable function.
///
/// The function itself is kept unchanged. Next to it a `NativeFunction`
/// descriptor named after the upper-cased function name is emitted, carrying
/// the function name, its parameter count as arity and a slice adapter.
/// `NativeFunction` must be in scope at the call site.
#[proc_macro_attribute]
pub fn calcix_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_name_str = fn_name.to_string();

    let mut arg_slots = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        match arg {
            FnArg::Typed(PatType { pat, ty, .. }) => {
                if !is_f64(ty) {
                    let arg_name = match **pat {
                        syn::Pat::Ident(ref ident) => ident.ident.to_string(),
                        _ => format!("#{}", i),
                    };
                    let err_msg = formatted_arg_error_msg(&arg_name, i, &fn_name_str);
                    return syn::Error::new(ty.span(), err_msg)
                        .to_compile_error()
                        .into();
                }
                arg_slots.push(quote! { args[#i] });
            }
            FnArg::Receiver(receiver) => {
                return syn::Error::new(receiver.span(), "calcix_fn cannot take self")
                    .to_compile_error()
                    .into();
            }
        }
    }

    match &input.sig.output {
        ReturnType::Type(_, ty) if is_f64(ty) => {}
        other => {
            let msg = format!("Expected {} to return f64", fn_name_str);
            return syn::Error::new(other.span(), msg).to_compile_error().into();
        }
    }

    let arity = arg_slots.len();
    let descriptor = format_ident!("{}", fn_name_str.to_uppercase());
    let args_pat = if arity == 0 {
        quote! { _ }
    } else {
        quote! { args }
    };
    let doc = format!("Registrable descriptor for `{}` ({} args).", fn_name_str, arity);

    let expanded = quote! {
        #input

        #[doc = #doc]
        #fn_vis const #descriptor: NativeFunction = NativeFunction {
            name: #fn_name_str,
            arity: #arity,
            function: |#args_pat: &[f64]| #fn_name(#(#arg_slots),*),
        };
    };

    TokenStream::from(expanded)
}
