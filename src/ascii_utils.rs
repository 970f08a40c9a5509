/*!
 * # Assemblage ASCII du labyrinthe
 *
 * Chaque cellule se dessine sur trois lignes (haut, contenu, bas). Ce module
 * colle ces blocs pour obtenir une seule image :
 * - de gauche à droite, chaque cellule après la première perd son premier
 *   caractère (la bordure verticale est partagée avec sa voisine de gauche) ;
 * - de haut en bas, chaque rangée sauf la dernière perd sa ligne basse (la
 *   bordure horizontale est portée par la ligne haute de la rangée suivante).
 */

/// Fusionne les blocs d'une rangée de cellules en lignes de texte.
///
/// # Arguments
///
/// * `blocks` - Les trois lignes de chaque cellule, de gauche à droite.
/// * `keep_bottom` - `false` pour toutes les rangées sauf la dernière.
pub fn merge_row(blocks: &[[String; 3]], keep_bottom: bool) -> Vec<String> {
    let line_count = if keep_bottom { 3 } else { 2 };
    (0..line_count)
        .map(|i| {
            let mut merged = String::new();
            for (j, block) in blocks.iter().enumerate() {
                if j == 0 {
                    merged.push_str(&block[i]);
                } else {
                    merged.extend(block[i].chars().skip(1));
                }
            }
            merged
        })
        .collect()
}

/// Assemble toutes les rangées et joint les lignes par `\n` (sans retour final).
pub fn merge_rows(rows: &[Vec<[String; 3]>]) -> String {
    let last = rows.len().saturating_sub(1);
    rows.iter()
        .enumerate()
        .flat_map(|(r, blocks)| merge_row(blocks, r == last))
        .collect::<Vec<_>>()
        .join("\n")
}
