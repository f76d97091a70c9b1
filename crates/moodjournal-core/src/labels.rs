// Static UI strings, one set per language
use crate::models::Language;

/// Every piece of fixed text the view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub language: &'static str,
    pub new_quote: &'static str,
    pub favorite: &'static str,
    pub favorites: &'static str,
}

const EN: Labels = Labels {
    title: "Mood Journal",
    subtitle: "Get inspired, one quote at a time ✨",
    language: "Language",
    new_quote: "New Quote",
    favorite: "Favorite",
    favorites: "Favorites",
};

const ES: Labels = Labels {
    title: "Diario de Humor",
    subtitle: "Inspírate, una cita a la vez ✨",
    language: "Idioma",
    new_quote: "Nueva cita",
    favorite: "Favorito",
    favorites: "Favoritos",
};

const FR: Labels = Labels {
    title: "Journal d'Humeur",
    subtitle: "Soyez inspiré, une citation à la fois ✨",
    language: "Langue",
    new_quote: "Nouvelle citation",
    favorite: "Favori",
    favorites: "Favoris",
};

const DE: Labels = Labels {
    title: "Stimmungsjournal",
    subtitle: "Lass dich inspirieren, ein Zitat nach dem anderen ✨",
    language: "Sprache",
    new_quote: "Neues Zitat",
    favorite: "Favorit",
    favorites: "Favoriten",
};

const HI: Labels = Labels {
    title: "मूड जर्नल",
    subtitle: "प्रेरित हों, एक समय में एक उद्धरण ✨",
    language: "भाषा",
    new_quote: "नया उद्धरण",
    favorite: "पसंदीदा",
    favorites: "पसंदीदा सूची",
};

const ZH: Labels = Labels {
    title: "心情日记",
    subtitle: "逐条获得启发 ✨",
    language: "语言",
    new_quote: "新名言",
    favorite: "收藏",
    favorites: "收藏列表",
};

pub fn labels_for(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Es => &ES,
        Language::Fr => &FR,
        Language::De => &DE,
        Language::Hi => &HI,
        Language::Zh => &ZH,
    }
}
