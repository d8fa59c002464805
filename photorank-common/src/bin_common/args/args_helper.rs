/// Declares a group of command line flags with defaults.
///
/// `args! { Name { "help" ['f'] field: Type = default; ... } }` expands to `NameCli`, which can
/// be flattened into a clap parser, and `NameArgs`, the plain value handed to library
/// code. `NameArgs` implements `Default` with the same defaults as the flags and has one
/// builder method per field, which is what tests use to tweak a single knob. The
/// bracketed short flag is optional. The calling crate needs `clap` with `derive`.
#[macro_export]
macro_rules! args {
    ($(#$argsmeta:tt)* $name:ident {
        $($fhelp:literal $([$fshort:literal])? $fname:ident: $ftype:ty = $fdefault:expr;)*
    }) => {
        $crate::bin_common::args::args_helper::paste! {
            #[derive(clap::Args, Debug)]
            pub struct [<$name Cli>] {
                $(
                    #[arg(long, $(short = $fshort,)? default_value_t = ($fdefault), help = $fhelp)]
                    $fname: $ftype,
                )*
            }

            $(#$argsmeta)*
            pub struct [<$name Args>] {
                $(
                    $fname: $ftype,
                )*
            }

            impl std::default::Default for [<$name Args>] {
                fn default() -> Self {
                    Self {
                        $(
                            $fname: $fdefault,
                        )*
                    }
                }
            }

            impl [<$name Args>] {
                $(
                    pub fn $fname(mut self, $fname: $ftype) -> Self {
                        self.$fname = $fname;
                        self
                    }
                )*
            }

            impl [<$name Cli>] {
                pub fn to_args(&self) -> [<$name Args>] {
                    [<$name Args>] {
                        $(
                            $fname: self.$fname.clone(),
                        )*
                    }
                }
            }
        }
    };
}

pub use args;
pub use paste::paste;
