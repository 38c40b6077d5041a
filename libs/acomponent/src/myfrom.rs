use std::borrow::Cow;

use kstring::KString;

/// Conversion into the string type used for all stored text. `From`
/// can't be extended for `KString` from here, hence the own trait.
pub trait MyFrom<T> {
    fn myfrom(s: T) -> Self;
}

// Any borrowed string-ish value: &str, &&str, &String, &KString, ..
impl<T: AsRef<str> + ?Sized> MyFrom<&T> for KString {
    fn myfrom(s: &T) -> Self {
        KString::from_ref(s.as_ref())
    }
}

impl MyFrom<String> for KString {
    fn myfrom(s: String) -> Self {
        KString::from_string(s)
    }
}

impl MyFrom<KString> for KString {
    fn myfrom(s: KString) -> Self {
        s
    }
}

impl<'t> MyFrom<Cow<'t, str>> for KString {
    fn myfrom(s: Cow<'t, str>) -> Self {
        match s {
            Cow::Borrowed(s) => KString::from_ref(s),
            Cow::Owned(s) => KString::from_string(s),
        }
    }
}

// Child keys.
impl MyFrom<usize> for KString {
    fn myfrom(n: usize) -> Self {
        KString::from_string(n.to_string())
    }
}

pub(crate) fn ks<T>(s: T) -> KString
where KString: MyFrom<T>
{
    KString::myfrom(s)
}
