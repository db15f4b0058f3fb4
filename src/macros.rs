use std::fmt;

/// Lazily rendered markup. Writing it to a formatter runs the closure.
pub struct RenderNode<F>(pub F);
impl<F> fmt::Display for RenderNode<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.0)(f)
    }
}

/// Text that is HTML-escaped when displayed.
pub struct Escaped<T>(pub T);
impl<T: fmt::Display> fmt::Display for Escaped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.0.to_string();
        for c in raw.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => fmt::Write::write_char(f, c)?,
            }
        }
        Ok(())
    }
}

/// Builds an element. Attribute values are escaped, children are written as-is,
/// so plain text children should go through [`Escaped`].
#[macro_export]
macro_rules! node {
    ($kind:ident $(, $attr:ident = $val:expr )* => $($child:expr),+ $(,)?) => {
        $crate::macros::RenderNode(|f: &mut std::fmt::Formatter<'_>| {
            write!(f, "<{}", stringify!($kind))?;
            $(write!(f, r#" {}="{}""#, stringify!($attr), $crate::macros::Escaped(&$val))?;)*
            write!(f, ">")?;
            $(write!(f, "{}", $child)?;)+
            write!(f, "</{}>", stringify!($kind))
        })
    };

    ($kind:ident $(, $attr:ident = $val:expr )* $(,)?) => {
        $crate::macros::RenderNode(|f: &mut std::fmt::Formatter<'_>| {
            write!(f, "<{}", stringify!($kind))?;
            $(write!(f, r#" {}="{}""#, stringify!($attr), $crate::macros::Escaped(&$val))?;)*
            write!(f, " />")
        })
    };
}

/// Concatenates nodes. Conditional parts can pass an empty string.
#[macro_export]
macro_rules! group_nodes {
    ($lnode:expr $(, $rnode:expr )+) => {
        $crate::macros::RenderNode(|f: &mut std::fmt::Formatter<'_>| {
            write!(f, "{}", $lnode)?;
            $(write!(f, "{}", $rnode)?;)+
            Ok(())
        })
    }
}
